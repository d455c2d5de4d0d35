//! Texture decoding module
//!
//! Turns a packed 2D texture record into a backend surface.
//!
//! # Architecture
//!
//! The module is organized into several sub-modules:
//! - `formats` - Surface format resolution across format versions
//! - `types` - Record, level and handle types
//! - `options` - Decoder configuration
//! - `converter` - The `Texture2DReader` pipeline
//! - `decoders` - Block decompression and channel remapping
//! - `staging` - Scoped staging allocations
//! - `backend` - Graphics backend trait and the software backend
//! - `helpers` - Export utilities
//!
//! # Examples
//!
//! ```rust,no_run
//! use content_texture_binary::BinaryReader;
//! use content_texture_binary::texture::{SoftwareBackend, Texture2DReader};
//!
//! let data = std::fs::read("wall.xnb")?;
//! let mut reader = BinaryReader::new(&data, 5);
//! let texture = Texture2DReader::new(SoftwareBackend::new()).read(&mut reader)?;
//! println!("{}x{} {}", texture.width(), texture.height(), texture.format());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod converter;
pub mod decoders;
pub mod formats;
pub mod helpers;
pub mod options;
pub mod staging;
pub mod types;

// Re-export main types for easy access
pub use backend::{GraphicsBackend, SoftwareBackend, SoftwareSurface};
pub use converter::Texture2DReader;
pub use decoders::{Decoder, LevelTransform, TextureDecoder};
pub use formats::{FormatInfo, LegacySurfaceFormat, SurfaceFormat, resolve_surface_format};
pub use helpers::TextureExporter;
pub use options::{DecoderOptions, MipLevelPolicy};
pub use staging::{HeapStagingAllocator, StagingAllocator};
pub use types::{MipLevel, SurfaceDescriptor, Texture2D, TextureRecord};

// Re-export decoder types for advanced usage
pub use decoders::{BlockDecompressor, ChannelRemapper};

use crate::error::Result;
use crate::reader::BinaryReader;

/// Decode one texture record held in memory onto the software backend
pub fn read_texture(
    data: &[u8],
    version: u8,
    options: DecoderOptions,
) -> Result<Texture2D<SoftwareSurface>> {
    let mut reader = BinaryReader::new(data, version);
    Texture2DReader::new(SoftwareBackend::new())
        .with_options(options)
        .read(&mut reader)
}

/// Quick function to check if a format is transformed on a target without
/// native block-format sampling
pub fn is_format_transformed(format: SurfaceFormat) -> bool {
    TextureDecoder::new(true).can_decode(format)
}
