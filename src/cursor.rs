use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Read position over a privately owned copy of the input.
///
/// Every read goes through [`take`](Self::take), which either hands back exactly the requested
/// bytes or fails with [`Error::TruncatedInput`] without moving the position.
#[derive(Clone, Debug)]
pub struct Cursor {
    data: Vec<u8>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor over a copy of `data`. The caller's buffer is never touched again.
    pub fn new(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Create a cursor that takes ownership of an existing buffer.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Take the next `n` bytes, advancing the read position past them.
    pub fn take(&mut self, n: usize) -> Result<&[u8]> {
        let available = self.remaining_len();
        if n > available {
            return Err(Error::TruncatedInput {
                requested: n,
                available,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    /// Number of bytes not yet read.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Number of bytes read so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The unread bytes, without consuming them.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_len() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.take(8)?))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }
}
