//! Binary stream reader for packed content records

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use thiserror::Error;

/// Errors raised by a content stream reader
#[derive(Error, Debug)]
pub enum StreamError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes left in the stream than requested
    #[error("Unexpected end of stream: requested {requested} bytes, {available} available")]
    UnexpectedEof { requested: usize, available: usize },
}

impl StreamError {
    /// Create a new unexpected end-of-stream error
    pub fn unexpected_eof(requested: usize, available: usize) -> Self {
        Self::UnexpectedEof {
            requested,
            available,
        }
    }
}

/// Source of primitive values for content type readers
///
/// Implementations own the stream cursor; a texture decode call borrows the
/// reader mutably for its whole duration.
pub trait ContentReader {
    /// Format version of the stream being read
    fn version(&self) -> u8;

    /// Read a little-endian signed 32-bit integer
    fn read_i32(&mut self) -> Result<i32, StreamError>;

    /// Read exactly `count` raw bytes
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, StreamError>;
}

/// Binary reader over an in-memory content stream
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
    version: u8,
}

impl<'a> BinaryReader<'a> {
    /// Create a new binary reader for a stream written with `version`
    pub fn new(data: &'a [u8], version: u8) -> Self {
        Self {
            cursor: Cursor::new(data),
            version,
        }
    }

    /// Get current position in the stream
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.cursor
            .get_ref()
            .len()
            .saturating_sub(self.position() as usize)
    }

    /// Check if every byte of the stream has been consumed
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Check if we have at least `count` bytes remaining
    pub fn has_bytes(&self, count: usize) -> bool {
        self.remaining() >= count
    }
}

impl ContentReader for BinaryReader<'_> {
    fn version(&self) -> u8 {
        self.version
    }

    fn read_i32(&mut self) -> Result<i32, StreamError> {
        if !self.has_bytes(4) {
            return Err(StreamError::unexpected_eof(4, self.remaining()));
        }
        Ok(self.cursor.read_i32::<LittleEndian>()?)
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, StreamError> {
        if !self.has_bytes(count) {
            return Err(StreamError::unexpected_eof(count, self.remaining()));
        }
        let mut buffer = vec![0u8; count];
        self.cursor.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}
