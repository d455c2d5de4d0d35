//! Channel remapping for uncompressed formats
//!
//! `NormalizedByte4` data is stored with its channels named for a two-channel
//! normal layout (Q, W, V, U from the high byte down). Backends expect plain
//! R, G, B, A bytes, so each pixel is reshuffled in place before upload.

use super::Decoder;
use crate::error::{DecodeStage, Result, TextureError};
use crate::texture::formats::SurfaceFormat;
use crate::texture::types::MipLevel;
use content_texture_core::COLOR_BYTES_PER_PIXEL;

/// In-place channel remapper for `NormalizedByte4`
pub struct ChannelRemapper;

impl ChannelRemapper {
    /// Create a new channel remapper
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ChannelRemapper {
    fn decode(&self, format: SurfaceFormat, mut level: MipLevel) -> Result<MipLevel> {
        if !self.can_decode(format) {
            return Err(TextureError::unsupported_format(
                DecodeStage::Remap,
                format,
            ));
        }

        remap_normalized_byte4(&mut level.data, level.width, level.height)?;
        Ok(level)
    }

    fn can_decode(&self, format: SurfaceFormat) -> bool {
        format.needs_channel_remap()
    }

    fn supported_formats(&self) -> Vec<SurfaceFormat> {
        vec![SurfaceFormat::NormalizedByte4]
    }
}

impl Default for ChannelRemapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Reorder `NormalizedByte4` pixels to R, G, B, A bytes in place
///
/// Each pixel is read as a little-endian word `w` and rewritten as
/// `[w >> 16, w >> 8, w, w >> 24]` (low byte of each). Rows are `width * 4`
/// bytes apart; bytes past the last row are left untouched.
pub fn remap_normalized_byte4(data: &mut [u8], width: u32, height: u32) -> Result<()> {
    let pitch = (width as usize)
        .checked_mul(COLOR_BYTES_PER_PIXEL)
        .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
    let expected = pitch
        .checked_mul(height as usize)
        .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
    if data.len() < expected {
        return Err(TextureError::truncated(
            DecodeStage::Remap,
            expected,
            data.len(),
        ));
    }
    if expected == 0 {
        return Ok(());
    }

    for row in data[..expected].chunks_exact_mut(pitch) {
        for pixel in row.chunks_exact_mut(COLOR_BYTES_PER_PIXEL) {
            let color = u32::from_le_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
            pixel[0] = (color >> 16) as u8; // R := W
            pixel[1] = (color >> 8) as u8; // G := V
            pixel[2] = color as u8; // B := U
            pixel[3] = (color >> 24) as u8; // A := Q
        }
    }

    Ok(())
}
