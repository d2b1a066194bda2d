use byteorder::{ByteOrder, LittleEndian};

use super::error::CursorError;

/// A bounds-checked little-endian reader over a fragment byte slice.
///
/// All record decoding goes through a cursor. A read that would pass the end
/// of the slice reports [`CursorError::OutOfBounds`] and leaves the cursor
/// where it was; nothing here can panic on malformed data.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to consume
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Take the next `width` bytes, advancing the cursor
    fn take(&mut self, width: usize) -> Result<&'a [u8], CursorError> {
        if width > self.remaining() {
            return Err(CursorError::OutOfBounds {
                requested: width,
                remaining: self.remaining(),
            });
        }
        let field = &self.buffer[self.position..self.position + width];
        self.position += width;
        Ok(field)
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CursorError> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }
}
