//! Texture decoders module
//!
//! Level transforms applied between reading a record and staging it:
//! block decompression for targets without native block-format sampling, and
//! channel remapping for formats stored in a non-canonical byte order.

mod basic;
mod compressed;

pub use basic::{ChannelRemapper, remap_normalized_byte4};
pub use compressed::{BlockDecompressor, decompress_dxt1, decompress_dxt3, decompress_dxt5};

use super::formats::SurfaceFormat;
use super::types::{MipLevel, TextureRecord};
use crate::error::Result;
use tracing::debug;

/// Transform a record's levels go through before staging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTransform {
    /// Expand block-compressed data to `Color`
    Decompress,
    /// Reorder channels in place, yielding `Color`
    Remap,
    /// Upload the bytes as stored
    PassThrough,
}

/// Main texture decoder dispatcher
///
/// Chooses at most one transform per record from its format and the target's
/// block-compression capability.
pub struct TextureDecoder {
    decompress_blocks: bool,
    compressed: BlockDecompressor,
    remapper: ChannelRemapper,
}

impl TextureDecoder {
    /// Create a decoder for a target that needs (`true`) or doesn't need
    /// block-compressed formats expanded on the CPU
    pub fn new(decompress_blocks: bool) -> Self {
        Self {
            decompress_blocks,
            compressed: BlockDecompressor::new(),
            remapper: ChannelRemapper::new(),
        }
    }

    /// Pick the transform for `format`
    pub fn plan(&self, format: SurfaceFormat) -> LevelTransform {
        if self.decompress_blocks && self.compressed.can_decode(format) {
            LevelTransform::Decompress
        } else if self.remapper.can_decode(format) {
            LevelTransform::Remap
        } else {
            LevelTransform::PassThrough
        }
    }

    /// Format the staged surface will have for a record stored as `format`
    pub fn output_format(&self, format: SurfaceFormat) -> SurfaceFormat {
        match self.plan(format) {
            LevelTransform::PassThrough => format,
            LevelTransform::Decompress | LevelTransform::Remap => SurfaceFormat::Color,
        }
    }

    /// Apply the planned transform to every level of `record`
    pub fn decode(&self, mut record: TextureRecord) -> Result<TextureRecord> {
        let transform = self.plan(record.surface_format);
        let decoder: &dyn Decoder = match transform {
            LevelTransform::PassThrough => return Ok(record),
            LevelTransform::Decompress => &self.compressed,
            LevelTransform::Remap => &self.remapper,
        };

        debug!(
            format = %record.surface_format,
            ?transform,
            levels = record.levels.len(),
            "transforming texture levels"
        );

        let format = record.surface_format;
        record.levels = record
            .levels
            .into_iter()
            .map(|level| decoder.decode(format, level))
            .collect::<Result<Vec<_>>>()?;
        record.surface_format = SurfaceFormat::Color;
        Ok(record)
    }

    /// Check if a format is transformed before staging
    pub fn can_decode(&self, format: SurfaceFormat) -> bool {
        self.plan(format) != LevelTransform::PassThrough
    }

    /// Formats this decoder transforms before staging
    pub fn supported_formats(&self) -> Vec<SurfaceFormat> {
        let mut formats = Vec::new();
        if self.decompress_blocks {
            formats.extend(self.compressed.supported_formats());
        }
        formats.extend(self.remapper.supported_formats());
        formats
    }
}

/// Common decoder trait
///
/// Implementors turn one level stored in a given format into a level of
/// canonical `Color` bytes with unchanged dimensions.
pub trait Decoder {
    /// Transform one level's bytes
    fn decode(&self, format: SurfaceFormat, level: MipLevel) -> Result<MipLevel>;

    /// Check if this decoder can handle the given format
    fn can_decode(&self, format: SurfaceFormat) -> bool;

    /// Get list of formats supported by this decoder
    fn supported_formats(&self) -> Vec<SurfaceFormat>;
}
