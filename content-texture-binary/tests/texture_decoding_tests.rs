//! Texture Decoding Tests
//!
//! End-to-end tests reading texture records from in-memory streams through
//! `Texture2DReader` onto the software backend.

use content_texture_binary::texture::{StagingAllocator, TextureExporter};
use content_texture_binary::{
    BinaryReader, ContentReader, DecodeStage, DecoderOptions, MipLevelPolicy, Result,
    SoftwareBackend, SurfaceFormat, Texture2DReader, TextureError,
};
use std::cell::Cell;
use std::rc::Rc;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

/// Build a record stream: tag, width, height, level count, then each level
fn record(tag: i32, width: i32, height: i32, levels: &[&[u8]]) -> Vec<u8> {
    let mut data = Vec::new();
    for value in [tag, width, height, levels.len() as i32] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    for level in levels {
        data.extend_from_slice(&(level.len() as i32).to_le_bytes());
        data.extend_from_slice(level);
    }
    data
}

/// Dxt1 block, red/blue endpoints, one index per row
fn red_blue_dxt1_block() -> [u8; 8] {
    [0x00, 0xF8, 0x1F, 0x00, 0x00, 0x55, 0xAA, 0xFF]
}

#[test]
fn test_legacy_dxt1_decodes_to_color() {
    let data = record(0, 4, 4, &[&red_blue_dxt1_block()]);
    let mut reader = BinaryReader::new(&data, 4);

    let texture = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut reader)
        .unwrap();

    assert_eq!(texture.format(), SurfaceFormat::Color);
    assert_eq!((texture.width(), texture.height()), (4, 4));
    assert_eq!(texture.level_count(), 1);

    let image = texture.surface().to_rgba_image().unwrap();
    let expected_rows = [RED, BLUE, [170, 0, 85, 255], [85, 0, 170, 255]];
    for (y, expected) in expected_rows.iter().enumerate() {
        for x in 0..4 {
            assert_eq!(&image.get_pixel(x, y as u32).0, expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_normalized_byte4_is_remapped() {
    let pixels = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
    let data = record(8, 2, 1, &[&pixels]);

    let texture = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 5))
        .unwrap();

    assert_eq!(texture.format(), SurfaceFormat::Color);
    assert_eq!(
        texture.surface().levels[0],
        vec![0x33, 0x22, 0x11, 0x44, 0x77, 0x66, 0x55, 0x88]
    );
}

#[test]
fn test_native_block_compression_keeps_blocks() {
    let block = red_blue_dxt1_block();
    let data = record(4, 4, 4, &[&block]);
    let backend = SoftwareBackend::new().with_block_compression(true);

    let texture = Texture2DReader::new(backend)
        .read(&mut BinaryReader::new(&data, 5))
        .unwrap();

    assert_eq!(texture.format(), SurfaceFormat::Dxt1);
    assert_eq!(texture.surface().levels[0], block.to_vec());
}

#[test]
fn test_forced_decompression() {
    let data = record(4, 4, 4, &[&red_blue_dxt1_block()]);
    let backend = SoftwareBackend::new().with_block_compression(true);
    let options = DecoderOptions::default().with_force_decompression(true);

    let texture = Texture2DReader::new(backend)
        .with_options(options)
        .read(&mut BinaryReader::new(&data, 5))
        .unwrap();

    assert_eq!(texture.format(), SurfaceFormat::Color);
    assert_eq!(texture.surface().levels[0].len(), 64);
}

#[test]
fn test_mip_chain_decodes_every_level() {
    // Dxt5 8x8: 4 blocks, then 4x4 and 2x2 with one block each
    let data = record(2, 8, 8, &[&[0u8; 64], &[0u8; 16], &[0u8; 16]]);

    let texture = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 3))
        .unwrap();

    assert_eq!(texture.level_count(), 3);
    let sizes: Vec<usize> = texture.surface().levels.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![256, 64, 16]);
}

#[test]
fn test_base_only_leaves_cursor_after_record() {
    let mut data = record(3, 2, 2, &[&[1u8; 16], &[2u8; 4]]);
    data.extend_from_slice(&0x7Fi32.to_le_bytes());
    let mut reader = BinaryReader::new(&data, 4);
    let options = DecoderOptions::default().with_mip_levels(MipLevelPolicy::BaseOnly);

    let texture = Texture2DReader::new(SoftwareBackend::new())
        .with_options(options)
        .read(&mut reader)
        .unwrap();

    assert_eq!(texture.level_count(), 1);
    assert_eq!(reader.read_i32().unwrap(), 0x7F);
}

#[test]
fn test_unrecognized_legacy_tag() {
    let data = record(99, 4, 4, &[&[0u8; 8]]);
    let err = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 4))
        .unwrap_err();

    assert!(matches!(
        err,
        TextureError::UnrecognizedFormat { tag: 99, version: 4 }
    ));
    assert_eq!(err.stage(), DecodeStage::ResolveFormat);
    assert!(err.is_corrupt_input());
}

#[test]
fn test_canonical_tag_past_enumeration() {
    let data = record(20, 4, 4, &[&[0u8; 64]]);
    let err = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 5))
        .unwrap_err();
    assert!(matches!(err, TextureError::UnrecognizedFormat { tag: 20, .. }));
}

#[test]
fn test_short_block_payload() {
    // Dxt3 8x8 needs four 16-byte blocks
    let data = record(1, 8, 8, &[&[0u8; 16]]);
    let err = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 4))
        .unwrap_err();

    assert!(matches!(
        err,
        TextureError::TruncatedPayload {
            stage: DecodeStage::Decompress,
            expected: 64,
            actual: 16
        }
    ));
}

#[test]
fn test_odd_sizes_decode() {
    for (width, height) in [(1, 1), (3, 3), (5, 5), (1, 5), (5, 3)] {
        let blocks = (width as usize).div_ceil(4) * (height as usize).div_ceil(4);
        let payload = vec![0xA5u8; blocks * 16];
        let data = record(6, width, height, &[&payload]);

        let texture = Texture2DReader::new(SoftwareBackend::new())
            .read(&mut BinaryReader::new(&data, 5))
            .unwrap();
        assert_eq!(
            texture.surface().levels[0].len(),
            (width * height * 4) as usize,
            "{width}x{height}"
        );
    }
}

#[derive(Default)]
struct CountingAllocator {
    acquired: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
    fail: bool,
}

struct CountedBuffer(Vec<u8>, Rc<Cell<usize>>);

impl Drop for CountedBuffer {
    fn drop(&mut self) {
        self.1.set(self.1.get() + 1);
    }
}

impl AsRef<[u8]> for CountedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for CountedBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl StagingAllocator for CountingAllocator {
    type Allocation = CountedBuffer;

    fn allocate(&self, size: usize) -> Result<CountedBuffer> {
        if self.fail {
            return Err(TextureError::allocation_failure(size, "out of staging memory"));
        }
        self.acquired.set(self.acquired.get() + 1);
        Ok(CountedBuffer(vec![0; size], Rc::clone(&self.released)))
    }
}

#[test]
fn test_staging_releases_every_allocation() {
    let allocator = CountingAllocator::default();
    let (acquired, released) = (Rc::clone(&allocator.acquired), Rc::clone(&allocator.released));
    let data = record(3, 4, 4, &[&[0u8; 64], &[0u8; 16], &[0u8; 4]]);

    let reader = Texture2DReader::new(SoftwareBackend::new()).with_allocator(allocator);
    reader.read(&mut BinaryReader::new(&data, 4)).unwrap();
    assert_eq!((acquired.get(), released.get()), (3, 3));

    // Backend refuses the surface after staging
    let data = record(4, 4, 4, &[&[0u8; 8]]);
    let allocator = CountingAllocator::default();
    let (acquired, released) = (Rc::clone(&allocator.acquired), Rc::clone(&allocator.released));
    let err = Texture2DReader::new(RejectingBackend)
        .with_allocator(allocator)
        .read(&mut BinaryReader::new(&data, 5))
        .unwrap_err();
    assert!(matches!(err, TextureError::SurfaceConstruction(_)));
    assert_eq!((acquired.get(), released.get()), (1, 1));
}

#[test]
fn test_allocation_failure_yields_no_texture() {
    let allocator = CountingAllocator {
        fail: true,
        ..Default::default()
    };
    let data = record(3, 1, 1, &[&[0u8; 4]]);

    let err = Texture2DReader::new(SoftwareBackend::new())
        .with_allocator(allocator)
        .read(&mut BinaryReader::new(&data, 4))
        .unwrap_err();

    assert!(matches!(err, TextureError::AllocationFailure { size: 4, .. }));
    assert_eq!(err.stage(), DecodeStage::Stage);
}

/// Backend claiming block support but refusing every surface
struct RejectingBackend;

impl content_texture_binary::GraphicsBackend for RejectingBackend {
    type Surface = ();

    fn supports_block_compression(&self) -> bool {
        true
    }

    fn create_surface(
        &self,
        _descriptor: &content_texture_binary::SurfaceDescriptor,
        _pixels: &[u8],
    ) -> Result<()> {
        Err(TextureError::surface("out of video memory"))
    }

    fn write_level(&self, _: &mut (), _: u32, _: u32, _: u32, _: &[u8]) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_decode_and_export_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wall.png");
    let data = record(0, 4, 4, &[&red_blue_dxt1_block()]);

    let texture = Texture2DReader::new(SoftwareBackend::new())
        .read(&mut BinaryReader::new(&data, 4))
        .unwrap();
    TextureExporter::export_png(texture.surface(), &path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.get_pixel(2, 1).0, BLUE);
}
