//! Block-compressed texture decoders
//!
//! Expands Dxt1, Dxt3 and Dxt5 data into 8-bit RGBA for targets whose
//! graphics API cannot sample block-compressed surfaces.
//!
//! Layouts follow the published BC1/BC2/BC3 block formats:
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression>

use super::Decoder;
use crate::error::{DecodeStage, Result, TextureError};
use crate::texture::formats::SurfaceFormat;
use crate::texture::types::MipLevel;
use content_texture_core::{BLOCK_DIMENSION, COLOR_BYTES_PER_PIXEL, PIXELS_PER_BLOCK};

type Rgba = [u8; 4];
type DecodedBlock = [Rgba; PIXELS_PER_BLOCK];

const DXT1_BLOCK_BYTES: usize = 8;
const DXT3_BLOCK_BYTES: usize = 16;
const DXT5_BLOCK_BYTES: usize = 16;

/// Decoder for 4x4 block-compressed formats
pub struct BlockDecompressor;

impl BlockDecompressor {
    /// Create a new block decompressor
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for BlockDecompressor {
    fn decode(&self, format: SurfaceFormat, level: MipLevel) -> Result<MipLevel> {
        let MipLevel {
            width,
            height,
            data,
        } = level;

        let rgba = match format {
            SurfaceFormat::Dxt1 => decompress_dxt1(&data, width, height)?,
            SurfaceFormat::Dxt3 => decompress_dxt3(&data, width, height)?,
            SurfaceFormat::Dxt5 => decompress_dxt5(&data, width, height)?,
            other => {
                return Err(TextureError::unsupported_format(
                    DecodeStage::Decompress,
                    other,
                ));
            }
        };

        Ok(MipLevel::new(width, height, rgba))
    }

    fn can_decode(&self, format: SurfaceFormat) -> bool {
        format.is_block_compressed()
    }

    fn supported_formats(&self) -> Vec<SurfaceFormat> {
        vec![SurfaceFormat::Dxt1, SurfaceFormat::Dxt3, SurfaceFormat::Dxt5]
    }
}

impl Default for BlockDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompress Dxt1 (BC1) data into `width * height * 4` RGBA bytes
pub fn decompress_dxt1(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    decompress_blocks::<DXT1_BLOCK_BYTES>(data, width, height, decode_dxt1_block)
}

/// Decompress Dxt3 (BC2) data into `width * height * 4` RGBA bytes
pub fn decompress_dxt3(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    decompress_blocks::<DXT3_BLOCK_BYTES>(data, width, height, decode_dxt3_block)
}

/// Decompress Dxt5 (BC3) data into `width * height * 4` RGBA bytes
pub fn decompress_dxt5(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    decompress_blocks::<DXT5_BLOCK_BYTES>(data, width, height, decode_dxt5_block)
}

/// Walk the blocks left to right, top to bottom, clipping edge blocks
fn decompress_blocks<const N: usize>(
    data: &[u8],
    width: u32,
    height: u32,
    decode_block: fn(&[u8; N]) -> DecodedBlock,
) -> Result<Vec<u8>> {
    let blocks_x = width.div_ceil(BLOCK_DIMENSION) as usize;
    let blocks_y = height.div_ceil(BLOCK_DIMENSION) as usize;
    let block_count = blocks_x
        .checked_mul(blocks_y)
        .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
    let expected = block_count
        .checked_mul(N)
        .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;
    if data.len() < expected {
        return Err(TextureError::truncated(
            DecodeStage::Decompress,
            expected,
            data.len(),
        ));
    }

    let (width, height) = (width as usize, height as usize);
    let output_len = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(COLOR_BYTES_PER_PIXEL))
        .ok_or_else(|| TextureError::invalid_dimensions(width as i64, height as i64))?;
    let mut output = vec![0u8; output_len];

    let mut block = [0u8; N];
    for (index, chunk) in data[..expected].chunks_exact(N).enumerate() {
        block.copy_from_slice(chunk);
        let pixels = decode_block(&block);

        let origin_x = (index % blocks_x) * BLOCK_DIMENSION as usize;
        let origin_y = (index / blocks_x) * BLOCK_DIMENSION as usize;
        for (i, pixel) in pixels.iter().enumerate() {
            let x = origin_x + i % BLOCK_DIMENSION as usize;
            let y = origin_y + i / BLOCK_DIMENSION as usize;
            if x >= width || y >= height {
                continue;
            }
            let offset = (y * width + x) * COLOR_BYTES_PER_PIXEL;
            output[offset..offset + COLOR_BYTES_PER_PIXEL].copy_from_slice(pixel);
        }
    }

    Ok(output)
}

/// Expand an RGB565 color to 8 bits per channel by bit replication
fn rgb565_to_rgb888(color: u16) -> [u8; 3] {
    let r5 = ((color >> 11) & 0x1F) as u8;
    let g6 = ((color >> 5) & 0x3F) as u8;
    let b5 = (color & 0x1F) as u8;

    [(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2)]
}

fn mix(a: u8, b: u8, weight_a: u32, weight_b: u32) -> u8 {
    ((a as u32 * weight_a + b as u32 * weight_b) / (weight_a + weight_b)) as u8
}

fn mix_rgb(a: [u8; 3], b: [u8; 3], weight_a: u32, weight_b: u32) -> Rgba {
    [
        mix(a[0], b[0], weight_a, weight_b),
        mix(a[1], b[1], weight_a, weight_b),
        mix(a[2], b[2], weight_a, weight_b),
        255,
    ]
}

/// Build the four-entry color table of an 8-byte color block
///
/// `punch_through` enables the three-color mode with transparent black that
/// Dxt1 selects when `color0 <= color1`.
fn color_palette(color0: u16, color1: u16, punch_through: bool) -> [Rgba; 4] {
    let c0 = rgb565_to_rgb888(color0);
    let c1 = rgb565_to_rgb888(color1);
    let e0 = [c0[0], c0[1], c0[2], 255];
    let e1 = [c1[0], c1[1], c1[2], 255];

    if punch_through && color0 <= color1 {
        [e0, e1, mix_rgb(c0, c1, 1, 1), [0, 0, 0, 0]]
    } else {
        [e0, e1, mix_rgb(c0, c1, 2, 1), mix_rgb(c0, c1, 1, 2)]
    }
}

/// Decode the 8-byte color half shared by all three formats
fn decode_color_block(block: &[u8], punch_through: bool) -> DecodedBlock {
    let color0 = u16::from_le_bytes([block[0], block[1]]);
    let color1 = u16::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let palette = color_palette(color0, color1, punch_through);

    let mut pixels = [[0u8; 4]; PIXELS_PER_BLOCK];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        *pixel = palette[((indices >> (2 * i)) & 0b11) as usize];
    }
    pixels
}

fn decode_dxt1_block(block: &[u8; DXT1_BLOCK_BYTES]) -> DecodedBlock {
    decode_color_block(block, true)
}

fn decode_dxt3_block(block: &[u8; DXT3_BLOCK_BYTES]) -> DecodedBlock {
    let alpha_bits = u64::from_le_bytes([
        block[0], block[1], block[2], block[3], block[4], block[5], block[6], block[7],
    ]);

    let mut pixels = decode_color_block(&block[8..], false);
    for (i, pixel) in pixels.iter_mut().enumerate() {
        let alpha4 = ((alpha_bits >> (4 * i)) & 0xF) as u8;
        pixel[3] = alpha4 * 17;
    }
    pixels
}

/// Build the eight-entry alpha table of a Dxt5 block
fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let mut table = [alpha0, alpha1, 0, 0, 0, 0, 0, 0];
    if alpha0 > alpha1 {
        for (j, entry) in table.iter_mut().enumerate().skip(2) {
            let j = j as u32;
            *entry = mix(alpha0, alpha1, 8 - j, j - 1);
        }
    } else {
        for (j, entry) in table.iter_mut().enumerate().take(6).skip(2) {
            let j = j as u32;
            *entry = mix(alpha0, alpha1, 6 - j, j - 1);
        }
        table[6] = 0;
        table[7] = 255;
    }
    table
}

fn decode_dxt5_block(block: &[u8; DXT5_BLOCK_BYTES]) -> DecodedBlock {
    let table = alpha_palette(block[0], block[1]);
    let alpha_codes = u64::from_le_bytes([
        block[2], block[3], block[4], block[5], block[6], block[7], 0, 0,
    ]);

    let mut pixels = decode_color_block(&block[8..], false);
    for (i, pixel) in pixels.iter_mut().enumerate() {
        pixel[3] = table[((alpha_codes >> (3 * i)) & 0b111) as usize];
    }
    pixels
}
