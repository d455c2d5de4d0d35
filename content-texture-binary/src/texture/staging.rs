//! Surface staging
//!
//! Final level bytes are copied into a scoped unmanaged allocation before the
//! backend sees them. The allocation owns its memory and releases it on
//! `Drop`, so every exit from [`stage_texture`], early error returns included,
//! frees it exactly once.

use super::backend::GraphicsBackend;
use super::types::{SurfaceDescriptor, Texture2D, TextureRecord};
use crate::error::{Result, TextureError};
use content_texture_core::FilterMode;
use core::alloc::Layout;
use safe_allocator_api::RawAlloc;
use tracing::{debug, trace};

/// Alignment of heap staging buffers
pub const STAGING_ALIGNMENT: usize = 16;

/// Source of scoped staging buffers
pub trait StagingAllocator {
    /// Owned buffer; dropping it releases the memory
    type Allocation: AsRef<[u8]> + AsMut<[u8]>;

    /// Allocate a buffer of exactly `size` bytes
    fn allocate(&self, size: usize) -> Result<Self::Allocation>;
}

/// Staging buffer backed by an aligned raw heap allocation
pub struct HeapAllocation {
    raw: RawAlloc,
    len: usize,
}

impl HeapAllocation {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for HeapAllocation {
    fn as_ref(&self) -> &[u8] {
        &self.raw.as_slice()[..self.len]
    }
}

impl AsMut<[u8]> for HeapAllocation {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.raw.as_mut_slice()[..self.len]
    }
}

/// Allocator handing out [`HeapAllocation`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapStagingAllocator;

impl StagingAllocator for HeapStagingAllocator {
    type Allocation = HeapAllocation;

    fn allocate(&self, size: usize) -> Result<Self::Allocation> {
        // Zero-sized layouts cannot be allocated
        let layout = Layout::from_size_align(size.max(1), STAGING_ALIGNMENT)
            .map_err(|e| TextureError::allocation_failure(size, e.to_string()))?;
        let raw = RawAlloc::new(layout)
            .map_err(|e| TextureError::allocation_failure(size, e.to_string()))?;
        Ok(HeapAllocation { raw, len: size })
    }
}

/// Copy `pixels` into a fresh staging buffer
pub fn stage_bytes<A: StagingAllocator>(allocator: &A, pixels: &[u8]) -> Result<A::Allocation> {
    let mut allocation = allocator.allocate(pixels.len())?;
    let buffer = allocation.as_mut();
    if buffer.len() != pixels.len() {
        return Err(TextureError::allocation_failure(
            pixels.len(),
            format!("allocator returned {} bytes", buffer.len()),
        ));
    }
    buffer.copy_from_slice(pixels);
    Ok(allocation)
}

/// Hand every level of `record` to `backend` and wrap the resulting surface
///
/// Level 0 creates the surface; later levels are written with
/// [`GraphicsBackend::write_level`]. Each level gets its own staging buffer,
/// released before the next one is acquired. No handle is returned if any
/// step fails.
pub fn stage_texture<B, A>(
    backend: &B,
    allocator: &A,
    record: &TextureRecord,
    filter: FilterMode,
) -> Result<Texture2D<B::Surface>>
where
    B: GraphicsBackend,
    A: StagingAllocator,
{
    let (base, rest) = record
        .levels
        .split_first()
        .ok_or_else(|| TextureError::invalid_dimensions(record.width, record.height))?;
    let level_count = u32::try_from(record.levels.len())
        .map_err(|_| TextureError::invalid_dimensions(record.width, record.height))?;

    let descriptor = SurfaceDescriptor {
        format: record.surface_format,
        width: record.width,
        height: record.height,
        level_count,
        filter,
    };
    debug!(
        format = %descriptor.format,
        width = descriptor.width,
        height = descriptor.height,
        levels = level_count,
        bytes = base.data.len(),
        "staging surface"
    );

    let mut surface = {
        let staging = stage_bytes(allocator, &base.data)?;
        backend.create_surface(&descriptor, staging.as_ref())?
    };

    for (index, level) in rest.iter().enumerate() {
        let level_index = index as u32 + 1;
        trace!(
            level = level_index,
            width = level.width,
            height = level.height,
            "staging mip level"
        );
        let staging = stage_bytes(allocator, &level.data)?;
        backend.write_level(
            &mut surface,
            level_index,
            level.width,
            level.height,
            staging.as_ref(),
        )?;
    }

    Ok(Texture2D::new(descriptor, surface))
}
