//! Texture export utilities
//!
//! Writes level 0 of a decoded `Color` surface to common image formats.

use crate::error::{Result, TextureError};
use crate::texture::backend::SoftwareSurface;
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::debug;

/// Texture exporter utility
pub struct TextureExporter;

impl TextureExporter {
    /// Export the base level of a surface as PNG
    pub fn export_png<P: AsRef<Path>>(surface: &SoftwareSurface, path: P) -> Result<()> {
        let image = surface.to_rgba_image()?;
        Self::save(&image, path.as_ref(), ImageFormat::Png)
    }

    /// Export the base level of a surface as BMP
    pub fn export_bmp<P: AsRef<Path>>(surface: &SoftwareSurface, path: P) -> Result<()> {
        let image = surface.to_rgba_image()?;
        Self::save(&image, path.as_ref(), ImageFormat::Bmp)
    }

    /// Export with the format picked from the file extension, PNG otherwise
    pub fn export_auto<P: AsRef<Path>>(surface: &SoftwareSurface, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "bmp" => Self::export_bmp(surface, path),
            _ => Self::export_png(surface, path),
        }
    }

    /// Get supported export formats
    pub fn supported_formats() -> Vec<&'static str> {
        vec!["png", "bmp"]
    }

    fn save(image: &RgbaImage, path: &Path, format: ImageFormat) -> Result<()> {
        debug!(path = %path.display(), ?format, "exporting surface");
        image
            .save_with_format(path, format)
            .map_err(|e| TextureError::export(format!("Failed to save {:?}: {}", format, e)))
    }
}
