//! Content Texture
//!
//! Decoding of 2D texture records from packed game-content streams.
//!
//! This crate re-exports the format vocabulary from `content-texture-core`
//! and the decoder from `content-texture-binary`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use content_texture::{DecoderOptions, SurfaceFormat, read_texture};
//!
//! let data = std::fs::read("wall.xnb")?;
//! let texture = read_texture(&data, 4, DecoderOptions::default())?;
//! assert_eq!(texture.format(), SurfaceFormat::Color);
//! # Ok::<(), content_texture::TextureError>(())
//! ```

// Re-export from core and binary crates
pub use content_texture_core::{
    FilterMode, FormatError, FormatInfo, LegacySurfaceFormat, SurfaceFormat, constants::*,
};

pub use content_texture_binary::{
    BinaryReader, ContentReader, DecodeStage, DecoderOptions, GraphicsBackend, MipLevelPolicy,
    Result, SoftwareBackend, StreamError, SurfaceDescriptor, Texture2D, Texture2DReader,
    TextureError, read_texture, resolve_asset_path,
};

pub use content_texture_binary::texture::TextureExporter;

/// The full decoder crate, for staging and decoder internals
pub mod binary {
    pub use content_texture_binary::texture::*;
}
