//! Content Texture Core
//!
//! Core pixel-format vocabulary for decoding packed texture content.
//! This crate provides the building blocks shared by the decoder and its
//! tools: the canonical and legacy surface format enumerations, format layout
//! metadata, and format-related constants.

pub mod constants;
pub mod error;
pub mod surface_format;

// Re-export main types
pub use constants::*;
pub use error::{FormatError, Result};
pub use surface_format::{FilterMode, FormatInfo, LegacySurfaceFormat, SurfaceFormat};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let format = SurfaceFormat::try_from(8).unwrap();
        assert_eq!(format, SurfaceFormat::NormalizedByte4);
        assert_eq!(FilterMode::default(), FilterMode::Linear);
    }
}
