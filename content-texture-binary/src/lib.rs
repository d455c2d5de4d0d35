//! Packed Texture Content Decoder
//!
//! This crate decodes 2D texture records from packed game-content streams
//! into backend surfaces:
//! - Surface format resolution across the legacy and canonical numbering
//! - Dxt1/Dxt3/Dxt5 block decompression for targets without native support
//! - `NormalizedByte4` channel remapping
//! - Scoped staging of level bytes onto a graphics backend
//!
//! # Example
//!
//! ```rust,no_run
//! use content_texture_binary::{BinaryReader, SoftwareBackend, Texture2DReader};
//! use content_texture_binary::texture::TextureExporter;
//!
//! let data = std::fs::read("wall.xnb")?;
//! let mut reader = BinaryReader::new(&data, 4);
//! let texture = Texture2DReader::new(SoftwareBackend::new()).read(&mut reader)?;
//! TextureExporter::export_png(texture.surface(), "wall.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod locate;
pub mod reader;
pub mod texture;

// Re-export core types
pub use error::{DecodeStage, Result, TextureError};
pub use locate::resolve_asset_path;
pub use reader::{BinaryReader, ContentReader, StreamError};
pub use texture::{
    DecoderOptions, GraphicsBackend, MipLevelPolicy, SoftwareBackend, SoftwareSurface,
    SurfaceDescriptor, SurfaceFormat, Texture2D, Texture2DReader, read_texture,
};
