//! Forward-only read position over a message buffer.

use asterix_core::DecodeError;
use bytes::{BufMut, Bytes, BytesMut};

/// Read position over one message.
///
/// The position only moves forward. Field reads past the end of the buffer
/// are zero-filled and still advance, so the position may end up beyond the
/// buffer length; every later octet read then reports
/// [`DecodeError::OutOfData`].
#[derive(Debug, Clone)]
pub struct Cursor {
    buf: Bytes,
    pos: usize,
}

impl Cursor {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Cursor over a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Octets left before the end of the buffer; zero once past it.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn read_octet(&mut self) -> Result<u8, DecodeError> {
        let octet = *self
            .buf
            .get(self.pos)
            .ok_or(DecodeError::OutOfData { offset: self.pos })?;
        self.pos += 1;
        Ok(octet)
    }

    /// Reads `n` octets, zero-filling whatever lies past the buffer end.
    /// Always advances by exactly `n`.
    pub fn read_padded(&mut self, n: usize) -> Bytes {
        let start = self.pos.min(self.buf.len());
        let end = self.pos.saturating_add(n).min(self.buf.len());
        self.pos = self.pos.saturating_add(n);

        if end - start == n {
            return self.buf.slice(start..end);
        }

        let mut padded = BytesMut::with_capacity(n);
        padded.put_slice(&self.buf[start..end]);
        padded.put_bytes(0, n - (end - start));
        padded.freeze()
    }

    /// Splits off the next `n` octets (clamped to the buffer) as their own
    /// cursor and advances past them.
    pub fn take(&mut self, n: usize) -> Cursor {
        let start = self.pos.min(self.buf.len());
        let end = self.pos.saturating_add(n).min(self.buf.len());
        self.pos = self.pos.saturating_add(n);
        Cursor::new(self.buf.slice(start..end))
    }
}
