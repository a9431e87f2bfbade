//! Per-depth scanline converters.
//!
//! Every scanline on disk is padded to an even number of bytes. Depth 1
//! packs eight pixels per byte, MSB first; depth 8 is one index per byte;
//! depth 24 is three colour bytes; depth 32 is a padding byte followed by
//! three colour bytes.

use alloc::vec::Vec;

use super::header::ChannelOrder;
use super::stream::{ByteSink, ByteSource};
use crate::pixel::PixelLayout;

/// Bits per pixel of a Sun raster file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Depth {
    /// 1 bit per pixel, palette indices 0 and 1.
    Bilevel,
    /// 8-bit palette index or gray level.
    Indexed,
    /// 24-bit colour.
    Rgb,
    /// 32-bit colour, first byte unused.
    Xrgb,
}

/// Expansion of every byte value into its eight bits, MSB first.
static BIT_EXPAND: [[u8; 8]; 256] = build_bit_table();

const fn build_bit_table() -> [[u8; 8]; 256] {
    let mut table = [[0u8; 8]; 256];
    let mut v = 0;
    while v < 256 {
        let mut bit = 0;
        while bit < 8 {
            table[v][bit] = ((v >> (7 - bit)) & 1) as u8;
            bit += 1;
        }
        v += 1;
    }
    table
}

impl Depth {
    pub fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            1 => Self::Bilevel,
            8 => Self::Indexed,
            24 => Self::Rgb,
            32 => Self::Xrgb,
            _ => return None,
        })
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Bilevel => 1,
            Self::Indexed => 8,
            Self::Rgb => 24,
            Self::Xrgb => 32,
        }
    }

    /// Pixel bytes per scanline on disk, excluding the alignment pad.
    pub fn bytes_per_line(self, width: usize) -> Option<usize> {
        match self {
            Self::Bilevel => Some(width.div_ceil(8)),
            Self::Indexed => Some(width),
            Self::Rgb => width.checked_mul(3),
            Self::Xrgb => width.checked_mul(4),
        }
    }

    /// Alignment bytes after each scanline (0 or 1).
    pub fn line_pad(self, width: usize) -> usize {
        self.bytes_per_line(width).map_or(0, |bpl| bpl % 2)
    }

    /// Bytes per pixel of the decoded raster.
    pub fn decoded_bytes_per_pixel(self) -> usize {
        match self {
            Self::Bilevel | Self::Indexed => 1,
            Self::Rgb | Self::Xrgb => 3,
        }
    }

    /// Decode one scanline into `out` (`width * decoded_bytes_per_pixel()`
    /// bytes), consuming the alignment pad.
    ///
    /// Returns false if the source ran out; missing bytes are left as zero.
    pub(crate) fn decode_row<S: ByteSource>(
        self,
        src: &mut S,
        order: ChannelOrder,
        out: &mut [u8],
    ) -> bool {
        let width = out.len() / self.decoded_bytes_per_pixel();
        let mut complete = true;

        match self {
            Self::Bilevel => {
                for chunk in out.chunks_mut(8) {
                    let byte = src.next_byte().unwrap_or_else(|| {
                        complete = false;
                        0
                    });
                    chunk.copy_from_slice(&BIT_EXPAND[usize::from(byte)][..chunk.len()]);
                }
            }
            Self::Indexed | Self::Rgb => {
                let got = src.read_into(out);
                if got < out.len() {
                    out[got..].fill(0);
                    complete = false;
                }
            }
            Self::Xrgb => {
                for px in out.chunks_exact_mut(3) {
                    let mut quad = [0u8; 4];
                    if src.read_into(&mut quad) < 4 {
                        complete = false;
                    }
                    px.copy_from_slice(&quad[1..]);
                }
            }
        }

        for _ in 0..self.line_pad(width) {
            if src.next_byte().is_none() {
                complete = false;
            }
        }

        if matches!(self, Self::Rgb | Self::Xrgb) && order == ChannelOrder::Bgr {
            for px in out.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
        }

        complete
    }

    /// Encode one row of `layout` pixels into its on-disk form, pad included,
    /// and hand it to `sink`. `line` is scratch space reused across rows.
    ///
    /// Colour depths are written in BGR order. For `Bilevel`, any nonzero
    /// index sets the bit; `invert` flips every bit of the packed line.
    pub(crate) fn encode_row<K: ByteSink>(
        self,
        row: &[u8],
        layout: PixelLayout,
        invert: bool,
        line: &mut Vec<u8>,
        sink: &mut K,
    ) {
        line.clear();
        let width = row.len() / layout.bytes_per_pixel();

        match self {
            Self::Bilevel => {
                line.extend(row.chunks(8).map(|chunk| {
                    let packed = chunk
                        .iter()
                        .enumerate()
                        .filter(|&(_, &idx)| idx != 0)
                        .fold(0u8, |acc, (bit, _)| acc | (0x80 >> bit));
                    if invert { !packed } else { packed }
                }));
            }
            Self::Indexed => line.extend_from_slice(row),
            Self::Rgb | Self::Xrgb => {
                let xrgb = self == Self::Xrgb;
                let bpp = layout.bytes_per_pixel();
                for px in row.chunks_exact(bpp) {
                    let (r, g, b) = match layout {
                        PixelLayout::Rgb8 => (px[0], px[1], px[2]),
                        _ => (px[2], px[1], px[0]),
                    };
                    if xrgb {
                        line.push(0);
                    }
                    line.extend_from_slice(&[b, g, r]);
                }
            }
        }

        line.resize(line.len() + self.line_pad(width), 0);
        sink.put_slice(line);
    }
}
