//! Byte-level sources and sinks the row converters are written against.
//!
//! Both raw and run-length encoded pixel data go through these, so the
//! depth converters never know which one they are talking to.

use alloc::vec::Vec;

/// A forward-only stream of decoded bytes.
pub(crate) trait ByteSource {
    /// Next byte, or `None` at end of stream.
    fn next_byte(&mut self) -> Option<u8>;

    /// Fill `buf` from the stream. Returns how many bytes were written;
    /// anything short of `buf.len()` means the stream ran dry.
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.next_byte() {
                Some(b) => *slot = b,
                None => return i,
            }
        }
        buf.len()
    }
}

/// Destination for encoded bytes.
pub(crate) trait ByteSink {
    fn put(&mut self, byte: u8);

    fn put_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put(b);
        }
    }
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }

    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

// ── Cursor over &[u8] ───────────────────────────────────────────────

/// Reader over an in-memory byte slice.
#[derive(Clone, Debug)]
pub(crate) struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_u32_be(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Borrow the next `n` bytes, or `None` (without advancing) if fewer remain.
    pub(crate) fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    /// Advance up to `n` bytes. Returns how many were actually skipped.
    pub(crate) fn skip(&mut self, n: usize) -> usize {
        let step = n.min(self.data.len() - self.pos);
        self.pos += step;
        step
    }
}

impl ByteSource for SliceReader<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}
