//! Constants shared across the content texture crates
//!
//! Format-version boundaries, block geometry and the limits the decoder
//! enforces on untrusted records.

/// First stream format version whose surface tags use the canonical numbering.
///
/// Records written with an older version carry a legacy tag that has to be
/// translated (see [`crate::LegacySurfaceFormat`]).
pub const CANONICAL_FORMAT_VERSION: u8 = 5;

/// Edge length, in pixels, of a block-compressed block.
pub const BLOCK_DIMENSION: u32 = 4;

/// Pixels covered by one block-compressed block.
pub const PIXELS_PER_BLOCK: usize = (BLOCK_DIMENSION * BLOCK_DIMENSION) as usize;

/// Bytes per pixel of the canonical uncompressed color format.
pub const COLOR_BYTES_PER_PIXEL: usize = 4;

/// Default upper bound on either texture dimension.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// Type-reader name a content container uses to route 2D textures to this decoder.
pub const TEXTURE2D_READER_NAME: &str = "Microsoft.Xna.Framework.Content.Texture2DReader";

/// Extensions tried, in order, when an asset name is given without one.
pub const ASSET_EXTENSIONS: &[&str] = &["xnb", "jpg", "bmp", "jpeg", "png", "gif", "pict", "tga"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_geometry() {
        assert_eq!(PIXELS_PER_BLOCK, 16);
        assert_eq!(COLOR_BYTES_PER_PIXEL * PIXELS_PER_BLOCK, 64);
    }

    #[test]
    fn test_extension_search_order() {
        assert_eq!(ASSET_EXTENSIONS.first(), Some(&"xnb"));
        assert_eq!(ASSET_EXTENSIONS.last(), Some(&"tga"));
    }
}
