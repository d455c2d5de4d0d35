//! Surface format resolution
//!
//! The on-disk numbering of surface formats changed at format version 5.
//! Older streams use a four-value legacy enumeration; newer streams store the
//! canonical tag directly. Reading a legacy tag as canonical (or the other way
//! round) silently produces the wrong format, so every tag goes through
//! [`resolve_surface_format`].

use crate::error::{Result, TextureError};
use content_texture_core::CANONICAL_FORMAT_VERSION;
use tracing::trace;

pub use content_texture_core::{FormatInfo, LegacySurfaceFormat, SurfaceFormat};

/// Map a raw format tag read from a stream of `version` to its canonical format
pub fn resolve_surface_format(version: u8, tag: i32) -> Result<SurfaceFormat> {
    let resolved = if version < CANONICAL_FORMAT_VERSION {
        LegacySurfaceFormat::try_from(tag).map(SurfaceFormat::from)
    } else {
        SurfaceFormat::try_from(tag)
    };

    let format = resolved.map_err(|e| TextureError::from_format(e, version))?;
    trace!(version, tag, %format, "resolved surface format");
    Ok(format)
}
