//! Texture2D content reader
//!
//! Reads one texture record from a content stream, resolves its surface
//! format, applies the level transform the target needs and stages the result
//! on a graphics backend.

use super::backend::GraphicsBackend;
use super::decoders::TextureDecoder;
use super::formats::resolve_surface_format;
use super::options::{DecoderOptions, MipLevelPolicy};
use super::staging::{HeapStagingAllocator, StagingAllocator, stage_texture};
use super::types::{MipLevel, Texture2D, TextureRecord, level_dimensions};
use crate::error::{DecodeStage, Result, TextureError};
use crate::reader::{ContentReader, StreamError};
use content_texture_core::TEXTURE2D_READER_NAME;
use tracing::{debug, instrument};

/// Upper bound on levels preallocated from an untrusted level count
const MAX_PREALLOCATED_LEVELS: usize = 32;

/// Content type reader for 2D textures
pub struct Texture2DReader<B, A = HeapStagingAllocator> {
    backend: B,
    allocator: A,
    options: DecoderOptions,
}

impl<B: GraphicsBackend> Texture2DReader<B> {
    /// Create a reader staging through the heap allocator with default options
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            allocator: HeapStagingAllocator,
            options: DecoderOptions::default(),
        }
    }
}

impl<B: GraphicsBackend, A: StagingAllocator> Texture2DReader<B, A> {
    /// Replace the decoder options
    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    /// Stage through a different allocator
    pub fn with_allocator<A2: StagingAllocator>(self, allocator: A2) -> Texture2DReader<B, A2> {
        Texture2DReader {
            backend: self.backend,
            allocator,
            options: self.options,
        }
    }

    /// Whether this reader decodes content of the given type-reader name
    pub fn handles(type_name: &str) -> bool {
        type_name == TEXTURE2D_READER_NAME
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Whether block-compressed levels are expanded before staging
    pub fn decompresses_blocks(&self) -> bool {
        self.options.force_decompression || !self.backend.supports_block_compression()
    }

    /// Read, transform and stage one texture record
    #[instrument(skip_all, fields(version = reader.version()))]
    pub fn read<R: ContentReader + ?Sized>(&self, reader: &mut R) -> Result<Texture2D<B::Surface>> {
        let record = self.read_record(reader)?;
        let record = self.decode_record(record)?;
        stage_texture(&self.backend, &self.allocator, &record, self.options.filter)
    }

    /// Apply the level transform this reader's target needs
    pub fn decode_record(&self, record: TextureRecord) -> Result<TextureRecord> {
        TextureDecoder::new(self.decompresses_blocks()).decode(record)
    }

    /// Read a texture record without transforming it
    ///
    /// Every level in the stream is consumed, whether or not it is kept.
    pub fn read_record<R: ContentReader + ?Sized>(&self, reader: &mut R) -> Result<TextureRecord> {
        let version = reader.version();
        let tag = reader.read_i32()?;
        let surface_format = resolve_surface_format(version, tag)?;

        let width = reader.read_i32()?;
        let height = reader.read_i32()?;
        let (width, height) = self.validate_dimensions(width, height)?;

        let level_count = reader.read_i32()?;
        let level_count = u32::try_from(level_count)
            .ok()
            .filter(|&count| count > 0)
            .ok_or_else(|| TextureError::invalid_dimensions(width, height))?;

        debug!(
            format = %surface_format,
            width,
            height,
            level_count,
            "reading texture record"
        );

        let keep = match self.options.mip_levels {
            MipLevelPolicy::All => level_count,
            MipLevelPolicy::BaseOnly => 1,
        };
        let mut levels = Vec::with_capacity((keep as usize).min(MAX_PREALLOCATED_LEVELS));
        for level in 0..level_count {
            let data = read_level_payload(reader)?;
            if level >= keep {
                debug!(level, bytes = data.len(), "discarding mip level");
                continue;
            }
            let (level_width, level_height) = level_dimensions(width, height, level);
            levels.push(MipLevel::new(level_width, level_height, data));
        }

        Ok(TextureRecord {
            surface_format,
            width,
            height,
            level_count,
            levels,
        })
    }

    fn validate_dimensions(&self, width: i32, height: i32) -> Result<(u32, u32)> {
        let max = self.options.max_dimension;
        let check = |extent: i32| u32::try_from(extent).ok().filter(|&e| e > 0 && e <= max);
        match (check(width), check(height)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(TextureError::invalid_dimensions(width, height)),
        }
    }
}

/// Read one `(imageLength, bytes)` pair
fn read_level_payload<R: ContentReader + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let length = reader.read_i32()?;
    let length = usize::try_from(length)
        .map_err(|_| TextureError::invalid_dimensions(length, 0))?;

    reader.read_bytes(length).map_err(|e| match e {
        StreamError::UnexpectedEof {
            requested,
            available,
        } => TextureError::truncated(DecodeStage::Read, requested, available),
        other => TextureError::Stream(other),
    })
}
