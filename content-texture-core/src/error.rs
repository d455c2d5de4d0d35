//! Error types for pixel-format conversions

use thiserror::Error;

/// Result type alias for core format operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors raised while mapping raw tags to pixel formats
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A legacy (pre-canonical) tag outside the four known values
    #[error("Unrecognized legacy surface format tag: {tag}")]
    UnknownLegacyTag { tag: i32 },

    /// A canonical tag outside the surface format enumeration
    #[error("Unrecognized surface format tag: {tag}")]
    UnknownTag { tag: i32 },
}

impl FormatError {
    /// The raw tag that failed to map
    pub fn tag(&self) -> i32 {
        match self {
            FormatError::UnknownLegacyTag { tag } | FormatError::UnknownTag { tag } => *tag,
        }
    }
}
