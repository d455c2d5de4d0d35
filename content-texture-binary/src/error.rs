//! Error types for texture decoding

use crate::reader::StreamError;
use content_texture_core::{FormatError, SurfaceFormat};
use thiserror::Error;

/// Result type for texture decoding operations
pub type Result<T> = std::result::Result<T, TextureError>;

/// Errors that can occur while decoding a texture record
#[derive(Error, Debug)]
pub enum TextureError {
    /// The stream reader failed before the texture payload was reached
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// Format tag outside the enumeration for the stream's version
    #[error("Unrecognized surface format tag {tag} (format version {version})")]
    UnrecognizedFormat { tag: i32, version: u8 },

    /// Declared payload or block count exceeds the bytes available
    #[error("Truncated payload in {stage:?} stage: expected {expected} bytes, got {actual}")]
    TruncatedPayload {
        stage: DecodeStage,
        expected: usize,
        actual: usize,
    },

    /// A level transform was handed a format it does not handle
    #[error("{format} is not handled by the {stage:?} stage")]
    UnsupportedFormat {
        stage: DecodeStage,
        format: SurfaceFormat,
    },

    /// Dimensions, level count or lengths that cannot describe a texture
    #[error("Invalid texture dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// The staging allocation could not be satisfied
    #[error("Staging allocation of {size} bytes failed: {reason}")]
    AllocationFailure { size: usize, reason: String },

    /// The graphics backend refused to construct the surface
    #[error("Surface construction failed: {0}")]
    SurfaceConstruction(String),

    /// I/O errors from path resolution or export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image export failed
    #[error("Export failed: {0}")]
    Export(String),
}

/// Pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    Read,
    ResolveFormat,
    Decompress,
    Remap,
    Stage,
    Export,
}

impl TextureError {
    /// Create a new unrecognized format error
    pub fn unrecognized_format(tag: i32, version: u8) -> Self {
        Self::UnrecognizedFormat { tag, version }
    }

    /// Create a new truncated payload error
    pub fn truncated(stage: DecodeStage, expected: usize, actual: usize) -> Self {
        Self::TruncatedPayload {
            stage,
            expected,
            actual,
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(stage: DecodeStage, format: SurfaceFormat) -> Self {
        Self::UnsupportedFormat { stage, format }
    }

    /// Create a new invalid dimensions error
    pub fn invalid_dimensions(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        Self::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Create a new allocation failure error
    pub fn allocation_failure<S: Into<String>>(size: usize, reason: S) -> Self {
        Self::AllocationFailure {
            size,
            reason: reason.into(),
        }
    }

    /// Create a new surface construction error
    pub fn surface<S: Into<String>>(msg: S) -> Self {
        Self::SurfaceConstruction(msg.into())
    }

    /// Create a new export error
    pub fn export<S: Into<String>>(msg: S) -> Self {
        Self::Export(msg.into())
    }

    /// Stage of the decode pipeline that produced this error
    pub fn stage(&self) -> DecodeStage {
        match self {
            TextureError::Stream(_) => DecodeStage::Read,
            TextureError::TruncatedPayload { stage, .. } => *stage,
            TextureError::UnsupportedFormat { stage, .. } => *stage,
            TextureError::InvalidDimensions { .. } => DecodeStage::Read,
            TextureError::UnrecognizedFormat { .. } => DecodeStage::ResolveFormat,
            TextureError::AllocationFailure { .. } => DecodeStage::Stage,
            TextureError::SurfaceConstruction(_) => DecodeStage::Stage,
            TextureError::Io(_) => DecodeStage::Export,
            TextureError::Export(_) => DecodeStage::Export,
        }
    }

    /// Check if the error came from malformed input rather than the environment
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            TextureError::UnrecognizedFormat { .. }
                | TextureError::TruncatedPayload { .. }
                | TextureError::InvalidDimensions { .. }
        )
    }

    /// Attach the stream version to a core format error
    pub(crate) fn from_format(err: FormatError, version: u8) -> Self {
        Self::unrecognized_format(err.tag(), version)
    }
}
