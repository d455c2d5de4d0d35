//! Surface format definitions
//!
//! The canonical pixel-format enumeration used by current content streams,
//! the four-value legacy enumeration written by older streams, and the
//! sampling filter handed to graphics backends.

use crate::constants::BLOCK_DIMENSION;
use crate::error::{FormatError, Result};
use serde::{Deserialize, Serialize};

/// Canonical surface formats
///
/// Discriminants match the numeric tags stored by format version 5 and later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(i32)]
pub enum SurfaceFormat {
    /// 8 bits per channel, stored R, G, B, A
    #[default]
    Color = 0,
    Bgr565 = 1,
    Bgra5551 = 2,
    Bgra4444 = 3,

    // Block-compressed formats
    Dxt1 = 4,
    Dxt3 = 5,
    Dxt5 = 6,

    // Signed normalized formats
    NormalizedByte2 = 7,
    NormalizedByte4 = 8,

    Rgba1010102 = 9,
    Rg32 = 10,
    Rgba64 = 11,
    Alpha8 = 12,

    // Floating point formats
    Single = 13,
    Vector2 = 14,
    Vector4 = 15,
    HalfSingle = 16,
    HalfVector2 = 17,
    HalfVector4 = 18,
    HdrBlendable = 19,
}

impl TryFrom<i32> for SurfaceFormat {
    type Error = FormatError;

    fn try_from(value: i32) -> Result<Self> {
        let format = match value {
            0 => SurfaceFormat::Color,
            1 => SurfaceFormat::Bgr565,
            2 => SurfaceFormat::Bgra5551,
            3 => SurfaceFormat::Bgra4444,
            4 => SurfaceFormat::Dxt1,
            5 => SurfaceFormat::Dxt3,
            6 => SurfaceFormat::Dxt5,
            7 => SurfaceFormat::NormalizedByte2,
            8 => SurfaceFormat::NormalizedByte4,
            9 => SurfaceFormat::Rgba1010102,
            10 => SurfaceFormat::Rg32,
            11 => SurfaceFormat::Rgba64,
            12 => SurfaceFormat::Alpha8,
            13 => SurfaceFormat::Single,
            14 => SurfaceFormat::Vector2,
            15 => SurfaceFormat::Vector4,
            16 => SurfaceFormat::HalfSingle,
            17 => SurfaceFormat::HalfVector2,
            18 => SurfaceFormat::HalfVector4,
            19 => SurfaceFormat::HdrBlendable,
            tag => return Err(FormatError::UnknownTag { tag }),
        };
        Ok(format)
    }
}

/// Surface formats as numbered by streams older than format version 5
///
/// Only these four values were ever written; anything else is corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum LegacySurfaceFormat {
    Dxt1 = 0,
    Dxt3 = 1,
    Dxt5 = 2,
    Color = 3,
}

impl TryFrom<i32> for LegacySurfaceFormat {
    type Error = FormatError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(LegacySurfaceFormat::Dxt1),
            1 => Ok(LegacySurfaceFormat::Dxt3),
            2 => Ok(LegacySurfaceFormat::Dxt5),
            3 => Ok(LegacySurfaceFormat::Color),
            tag => Err(FormatError::UnknownLegacyTag { tag }),
        }
    }
}

impl From<LegacySurfaceFormat> for SurfaceFormat {
    fn from(legacy: LegacySurfaceFormat) -> Self {
        match legacy {
            LegacySurfaceFormat::Dxt1 => SurfaceFormat::Dxt1,
            LegacySurfaceFormat::Dxt3 => SurfaceFormat::Dxt3,
            LegacySurfaceFormat::Dxt5 => SurfaceFormat::Dxt5,
            LegacySurfaceFormat::Color => SurfaceFormat::Color,
        }
    }
}

/// Texture sampling filter requested for a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Point,
    #[default]
    Linear,
}

/// Surface format layout metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    pub name: &'static str,
    /// Bytes per pixel, or bytes per block for block-compressed formats
    pub bytes_per_unit: u32,
    /// (width, height) in pixels covered by one unit
    pub block_size: (u32, u32),
    pub compressed: bool,
    pub has_alpha: bool,
}

impl FormatInfo {
    const fn pixel(name: &'static str, bytes: u32, has_alpha: bool) -> Self {
        Self {
            name,
            bytes_per_unit: bytes,
            block_size: (1, 1),
            compressed: false,
            has_alpha,
        }
    }

    const fn block(name: &'static str, bytes: u32, has_alpha: bool) -> Self {
        Self {
            name,
            bytes_per_unit: bytes,
            block_size: (BLOCK_DIMENSION, BLOCK_DIMENSION),
            compressed: true,
            has_alpha,
        }
    }
}

impl SurfaceFormat {
    /// Get layout information for this format
    pub fn info(&self) -> FormatInfo {
        match self {
            SurfaceFormat::Color => FormatInfo::pixel("Color", 4, true),
            SurfaceFormat::Bgr565 => FormatInfo::pixel("Bgr565", 2, false),
            SurfaceFormat::Bgra5551 => FormatInfo::pixel("Bgra5551", 2, true),
            SurfaceFormat::Bgra4444 => FormatInfo::pixel("Bgra4444", 2, true),
            SurfaceFormat::Dxt1 => FormatInfo::block("Dxt1", 8, true),
            SurfaceFormat::Dxt3 => FormatInfo::block("Dxt3", 16, true),
            SurfaceFormat::Dxt5 => FormatInfo::block("Dxt5", 16, true),
            SurfaceFormat::NormalizedByte2 => FormatInfo::pixel("NormalizedByte2", 2, false),
            SurfaceFormat::NormalizedByte4 => FormatInfo::pixel("NormalizedByte4", 4, true),
            SurfaceFormat::Rgba1010102 => FormatInfo::pixel("Rgba1010102", 4, true),
            SurfaceFormat::Rg32 => FormatInfo::pixel("Rg32", 4, false),
            SurfaceFormat::Rgba64 => FormatInfo::pixel("Rgba64", 8, true),
            SurfaceFormat::Alpha8 => FormatInfo::pixel("Alpha8", 1, true),
            SurfaceFormat::Single => FormatInfo::pixel("Single", 4, false),
            SurfaceFormat::Vector2 => FormatInfo::pixel("Vector2", 8, false),
            SurfaceFormat::Vector4 => FormatInfo::pixel("Vector4", 16, true),
            SurfaceFormat::HalfSingle => FormatInfo::pixel("HalfSingle", 2, false),
            SurfaceFormat::HalfVector2 => FormatInfo::pixel("HalfVector2", 4, false),
            SurfaceFormat::HalfVector4 => FormatInfo::pixel("HalfVector4", 8, true),
            SurfaceFormat::HdrBlendable => FormatInfo::pixel("HdrBlendable", 8, true),
        }
    }

    /// Numeric tag of this format in canonical streams
    pub fn tag(&self) -> i32 {
        *self as i32
    }

    /// Check if the format stores 4x4 compressed blocks
    pub fn is_block_compressed(&self) -> bool {
        matches!(
            self,
            SurfaceFormat::Dxt1 | SurfaceFormat::Dxt3 | SurfaceFormat::Dxt5
        )
    }

    /// Check if the on-disk channel order must be remapped before upload
    pub fn needs_channel_remap(&self) -> bool {
        matches!(self, SurfaceFormat::NormalizedByte4)
    }

    /// Byte size of one mip level with the given dimensions
    ///
    /// Returns `None` when the size does not fit in `usize`.
    pub fn level_size(&self, width: u32, height: u32) -> Option<usize> {
        let info = self.info();
        let units_x = width.div_ceil(info.block_size.0) as usize;
        let units_y = height.div_ceil(info.block_size.1) as usize;
        units_x
            .checked_mul(units_y)?
            .checked_mul(info.bytes_per_unit as usize)
    }
}

impl std::fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().name)
    }
}
