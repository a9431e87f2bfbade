//! Sun raster run-length encoding (`RT_BYTE_ENCODED`).
//!
//! The scheme is byte oriented and uses `0x80` as an escape:
//!
//! | bytes              | meaning                          |
//! |--------------------|----------------------------------|
//! | `v` (`v != 0x80`)  | one literal `v`                  |
//! | `0x80 0x00`        | one literal `0x80`               |
//! | `0x80 n v` (`n>0`) | `v` repeated `n + 1` times       |
//!
//! Runs never exceed 256 bytes. A run of two non-escape bytes is written as
//! two literals, since the escape form would cost three.
//!
//! Runs are not aligned to scanlines: a single encoder or decoder covers the
//! whole pixel stream of one image.

use alloc::vec;
use alloc::vec::Vec;

use super::stream::{ByteSink, ByteSource, SliceReader};

/// Escape byte introducing a run.
pub const ESCAPE: u8 = 0x80;

/// Longest run one escape sequence can describe.
pub const MAX_RUN: usize = 256;

// ── Decoder ─────────────────────────────────────────────────────────

/// Streaming RLE decoder over an in-memory byte slice.
///
/// Bytes of a run that have not been handed out yet are buffered, so the
/// caller can pull single bytes or whole rows in any mix.
#[derive(Clone, Debug)]
pub struct RleDecoder<'a> {
    src: SliceReader<'a>,
    run_value: u8,
    run_left: usize,
}

impl<'a> RleDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            src: SliceReader::new(data),
            run_value: 0,
            run_left: 0,
        }
    }

    /// Number of encoded input bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.src.position()
    }

    /// Next decoded byte, or `None` once the encoded stream is exhausted
    /// (including in the middle of an escape sequence).
    pub fn next_byte(&mut self) -> Option<u8> {
        if self.run_left > 0 {
            self.run_left -= 1;
            return Some(self.run_value);
        }

        let flag = self.src.next_byte()?;
        if flag != ESCAPE {
            return Some(flag);
        }

        let count = self.src.next_byte()?;
        if count == 0 {
            return Some(ESCAPE);
        }

        let value = self.src.next_byte()?;
        self.run_value = value;
        self.run_left = usize::from(count);
        Some(value)
    }

    /// Decode into `buf`. Returns the number of bytes produced, which is
    /// less than `buf.len()` only if the input ran out.
    pub fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            if self.run_left > 0 {
                let n = self.run_left.min(buf.len() - filled);
                buf[filled..filled + n].fill(self.run_value);
                self.run_left -= n;
                filled += n;
                continue;
            }
            match self.next_byte() {
                Some(b) => {
                    buf[filled] = b;
                    filled += 1;
                }
                None => break,
            }
        }
        filled
    }
}

impl ByteSource for RleDecoder<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        RleDecoder::next_byte(self)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        RleDecoder::read_into(self, buf)
    }
}

// ── Encoder ─────────────────────────────────────────────────────────

/// Streaming RLE encoder appending to a `Vec<u8>`.
///
/// Call [`finish`](Self::finish) to flush the pending run; dropping the
/// encoder without it loses the tail of the stream.
#[derive(Debug)]
pub struct RleEncoder<'a> {
    out: &'a mut Vec<u8>,
    value: u8,
    count: usize,
}

impl<'a> RleEncoder<'a> {
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            value: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, value: u8) {
        if self.count == 0 {
            self.value = value;
            self.count = 1;
            return;
        }

        if self.value == value {
            self.count += 1;
            if self.count > MAX_RUN {
                put_run(self.out, MAX_RUN, value);
                self.count -= MAX_RUN;
            }
            return;
        }

        put_run(self.out, self.count, self.value);
        self.value = value;
        self.count = 1;
    }

    pub fn push_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Write out the pending run.
    pub fn finish(self) {
        if self.count > 0 {
            put_run(self.out, self.count, self.value);
        }
    }
}

impl ByteSink for RleEncoder<'_> {
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }

    fn put_slice(&mut self, bytes: &[u8]) {
        self.push_slice(bytes);
    }
}

/// Emit a run with `1 <= n <= 256`.
fn put_run(out: &mut Vec<u8>, n: usize, value: u8) {
    debug_assert!((1..=MAX_RUN).contains(&n));
    if n > 2 || (n == 2 && value == ESCAPE) {
        out.extend_from_slice(&[ESCAPE, (n - 1) as u8, value]);
    } else if n == 2 {
        out.extend_from_slice(&[value, value]);
    } else if value == ESCAPE {
        out.extend_from_slice(&[ESCAPE, 0]);
    } else {
        out.push(value);
    }
}

// ── One-shot helpers ────────────────────────────────────────────────

/// Run-length encode a whole buffer.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut enc = RleEncoder::new(&mut out);
    enc.push_slice(data);
    enc.finish();
    out
}

/// Decode `expected_len` bytes from an RLE stream.
///
/// Returns the decoded bytes and whether the input ended early. A short
/// input is not an error: the missing tail is zero-filled.
pub fn decode(data: &[u8], expected_len: usize) -> (Vec<u8>, bool) {
    let mut out = vec![0u8; expected_len];
    let got = RleDecoder::new(data).read_into(&mut out);
    (out, got < expected_len)
}
