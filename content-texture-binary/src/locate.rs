//! Asset path resolution
//!
//! Content is often referenced without an extension. A bare name is
//! resolved by probing the known asset extensions in order.

use content_texture_core::ASSET_EXTENSIONS;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Resolve `path` to an existing asset file
///
/// Returns the path itself if it exists. A missing path that already has an
/// extension resolves to `None`; otherwise the first existing candidate from
/// [`ASSET_EXTENSIONS`] wins.
pub fn resolve_asset_path<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        return Some(path.to_path_buf());
    }
    if path.extension().is_some() {
        return None;
    }

    ASSET_EXTENSIONS.iter().find_map(|extension| {
        let candidate = path.with_extension(extension);
        trace!(candidate = %candidate.display(), "probing asset path");
        candidate.exists().then_some(candidate)
    })
}
