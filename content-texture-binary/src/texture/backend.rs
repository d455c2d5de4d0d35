//! Graphics backend abstraction
//!
//! The decoder never talks to a GPU directly. It hands staged bytes to a
//! [`GraphicsBackend`], which reports whether it can sample block-compressed
//! formats and constructs its own surface type from a [`SurfaceDescriptor`].

use super::formats::SurfaceFormat;
use super::types::SurfaceDescriptor;
use crate::error::{Result, TextureError};
use image::RgbaImage;

/// Target that turns staged pixel bytes into surfaces
pub trait GraphicsBackend {
    /// Surface handle produced by this backend
    type Surface;

    /// Whether Dxt1/Dxt3/Dxt5 data can be uploaded without decompression
    fn supports_block_compression(&self) -> bool;

    /// Construct a surface and upload level 0
    fn create_surface(
        &self,
        descriptor: &SurfaceDescriptor,
        pixels: &[u8],
    ) -> Result<Self::Surface>;

    /// Upload mip level `level` (1-based past the base) into an existing surface
    fn write_level(
        &self,
        surface: &mut Self::Surface,
        level: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<()>;
}

/// CPU-side surface holding a copy of every uploaded level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareSurface {
    pub descriptor: SurfaceDescriptor,
    pub levels: Vec<Vec<u8>>,
}

impl SoftwareSurface {
    /// Bytes of one level, if uploaded
    pub fn level(&self, index: usize) -> Option<&[u8]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Level 0 as an RGBA image
    ///
    /// Only `Color` surfaces have a direct RGBA layout.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let SurfaceDescriptor {
            format,
            width,
            height,
            ..
        } = self.descriptor;
        if format != SurfaceFormat::Color {
            return Err(TextureError::export(format!(
                "Cannot convert {} surface to RGBA",
                format
            )));
        }

        let expected = format
            .level_size(width, height)
            .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
        let pixels = self
            .level(0)
            .filter(|pixels| pixels.len() >= expected)
            .ok_or_else(|| TextureError::export("Surface has no complete base level"))?;

        RgbaImage::from_raw(width, height, pixels[..expected].to_vec())
            .ok_or_else(|| TextureError::export("Failed to create RGBA image from surface"))
    }
}

/// Backend that keeps surfaces in memory
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareBackend {
    block_compression: bool,
}

impl SoftwareBackend {
    /// Backend without native block-format sampling
    pub fn new() -> Self {
        Self::default()
    }

    /// Report native block-format sampling as `enabled`
    pub fn with_block_compression(mut self, enabled: bool) -> Self {
        self.block_compression = enabled;
        self
    }

    fn check_level(format: SurfaceFormat, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
        let expected = format
            .level_size(width, height)
            .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
        if pixels.len() < expected {
            return Err(TextureError::surface(format!(
                "{}x{} {} level needs {} bytes, got {}",
                width,
                height,
                format,
                expected,
                pixels.len()
            )));
        }
        Ok(())
    }
}

impl GraphicsBackend for SoftwareBackend {
    type Surface = SoftwareSurface;

    fn supports_block_compression(&self) -> bool {
        self.block_compression
    }

    fn create_surface(
        &self,
        descriptor: &SurfaceDescriptor,
        pixels: &[u8],
    ) -> Result<Self::Surface> {
        if descriptor.format.is_block_compressed() && !self.block_compression {
            return Err(TextureError::surface(format!(
                "Backend cannot sample {} surfaces",
                descriptor.format
            )));
        }
        Self::check_level(descriptor.format, descriptor.width, descriptor.height, pixels)?;

        let mut levels = Vec::with_capacity(descriptor.level_count as usize);
        levels.push(pixels.to_vec());
        Ok(SoftwareSurface {
            descriptor: *descriptor,
            levels,
        })
    }

    fn write_level(
        &self,
        surface: &mut Self::Surface,
        level: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<()> {
        if level as usize != surface.levels.len() || level >= surface.descriptor.level_count {
            return Err(TextureError::surface(format!(
                "Level {} written out of order ({} of {} present)",
                level,
                surface.levels.len(),
                surface.descriptor.level_count
            )));
        }
        Self::check_level(surface.descriptor.format, width, height, pixels)?;

        surface.levels.push(pixels.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_texture_core::FilterMode;

    fn descriptor(format: SurfaceFormat, width: u32, height: u32, levels: u32) -> SurfaceDescriptor {
        SurfaceDescriptor {
            format,
            width,
            height,
            level_count: levels,
            filter: FilterMode::Linear,
        }
    }

    #[test]
    fn test_create_surface_and_levels() {
        let backend = SoftwareBackend::new();
        let desc = descriptor(SurfaceFormat::Color, 2, 2, 2);
        let mut surface = backend.create_surface(&desc, &[7u8; 16]).unwrap();
        backend.write_level(&mut surface, 1, 1, 1, &[1, 2, 3, 4]).unwrap();

        assert_eq!(surface.levels.len(), 2);
        assert_eq!(surface.level(1), Some(&[1u8, 2, 3, 4][..]));
        assert!(backend.write_level(&mut surface, 2, 1, 1, &[0; 4]).is_err());
    }

    #[test]
    fn test_short_level_rejected() {
        let backend = SoftwareBackend::new();
        let err = backend
            .create_surface(&descriptor(SurfaceFormat::Color, 2, 2, 1), &[0u8; 15])
            .unwrap_err();
        assert!(matches!(err, TextureError::SurfaceConstruction(_)));
    }

    #[test]
    fn test_block_formats_need_capability() {
        let desc = descriptor(SurfaceFormat::Dxt1, 4, 4, 1);
        assert!(SoftwareBackend::new().create_surface(&desc, &[0u8; 8]).is_err());

        let native = SoftwareBackend::new().with_block_compression(true);
        assert!(native.supports_block_compression());
        let surface = native.create_surface(&desc, &[0u8; 8]).unwrap();
        assert!(surface.to_rgba_image().is_err());
    }

    #[test]
    fn test_to_rgba_image() {
        let backend = SoftwareBackend::new();
        let pixels = [255, 0, 0, 255, 0, 255, 0, 128];
        let surface = backend
            .create_surface(&descriptor(SurfaceFormat::Color, 2, 1, 1), &pixels)
            .unwrap();
        let image = surface.to_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0, 128]);
    }
}
