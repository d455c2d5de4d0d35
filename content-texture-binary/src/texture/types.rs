//! Texture data structures
//!
//! This module defines the transient record assembled while reading a texture
//! from a stream, and the public handle produced once it has been staged.

use super::formats::SurfaceFormat;
use content_texture_core::FilterMode;
use serde::{Deserialize, Serialize};

/// Pixel data of one mip level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl MipLevel {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Dimensions of mip level `level` of a `width`x`height` texture
pub fn level_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    let shrink = |extent: u32| extent.checked_shr(level).unwrap_or(0).max(1);
    (shrink(width), shrink(height))
}

/// Texture record as read from a content stream
///
/// Built field by field by the reader, transformed in place by at most one of
/// the block decompressor or the channel remapper, then consumed by the
/// stager. `width` and `height` never change after reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    pub surface_format: SurfaceFormat,
    pub width: u32,
    pub height: u32,
    /// Number of levels declared by the stream
    pub level_count: u32,
    /// Levels kept for decoding; level 0 first
    pub levels: Vec<MipLevel>,
}

impl TextureRecord {
    /// Level 0 of the record
    pub fn base_level(&self) -> Option<&MipLevel> {
        self.levels.first()
    }

    /// Texture dimensions as tuple
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Description of a surface handed to a graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub format: SurfaceFormat,
    pub width: u32,
    pub height: u32,
    pub level_count: u32,
    pub filter: FilterMode,
}

/// Decoded 2D texture wrapping a backend surface
#[derive(Debug)]
pub struct Texture2D<S> {
    descriptor: SurfaceDescriptor,
    surface: S,
}

impl<S> Texture2D<S> {
    pub(crate) fn new(descriptor: SurfaceDescriptor, surface: S) -> Self {
        Self {
            descriptor,
            surface,
        }
    }

    /// Format the surface was created with
    pub fn format(&self) -> SurfaceFormat {
        self.descriptor.format
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    /// Number of levels uploaded to the surface
    pub fn level_count(&self) -> u32 {
        self.descriptor.level_count
    }

    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    /// Backend surface handle
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Take ownership of the backend surface
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_dimensions() {
        assert_eq!(level_dimensions(16, 8, 0), (16, 8));
        assert_eq!(level_dimensions(16, 8, 1), (8, 4));
        assert_eq!(level_dimensions(16, 8, 3), (2, 1));
        assert_eq!(level_dimensions(16, 8, 4), (1, 1));
        assert_eq!(level_dimensions(5, 3, 1), (2, 1));
        assert_eq!(level_dimensions(1, 1, 40), (1, 1));
    }

    #[test]
    fn test_record_accessors() {
        let record = TextureRecord {
            surface_format: SurfaceFormat::Color,
            width: 2,
            height: 1,
            level_count: 1,
            levels: vec![MipLevel::new(2, 1, vec![0; 8])],
        };
        assert_eq!(record.dimensions(), (2, 1));
        assert_eq!(record.base_level().map(|l| l.data.len()), Some(8));
    }
}
