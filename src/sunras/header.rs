//! Sun raster file header and colormap.
//!
//! The header is eight big-endian `u32` words:
//!
//! ```text
//! 0  ras_magic      0x59a66a95
//! 4  ras_width
//! 8  ras_height
//! 12 ras_depth      1, 8, 24 or 32
//! 16 ras_length     size of pixel data (advisory, may be 0)
//! 20 ras_type       encoding, see RasType
//! 24 ras_maptype    0 = none, 1 = RGB, 2 = raw
//! 28 ras_maplength  colormap size in bytes
//! ```
//!
//! An RGB colormap follows the header in planar form: all reds, then all
//! greens, then all blues.

use alloc::format;
use alloc::vec::Vec;

use super::stream::SliceReader;
use crate::error::RasterError;

/// Magic number at the start of every Sun raster file.
pub const RAS_MAGIC: u32 = 0x59A6_6A95;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 32;

/// Raw Sun raster header, one field per on-disk word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RasterHeader {
    pub magic: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub length: u32,
    pub ras_type: u32,
    pub map_type: u32,
    pub map_length: u32,
}

impl RasterHeader {
    /// Read a header from the start of `data`.
    ///
    /// If `data` is shorter than [`HEADER_LEN`], the returned header has its
    /// magic cleared, so [`is_valid`](Self::is_valid) is false. That is the
    /// only signal for a short header.
    pub fn read(data: &[u8]) -> Self {
        let mut src = SliceReader::new(data);
        Self::read_from(&mut src)
    }

    pub(crate) fn read_from(src: &mut SliceReader<'_>) -> Self {
        let mut words = [0u32; 8];
        for word in words.iter_mut() {
            match src.read_u32_be() {
                Some(v) => *word = v,
                None => {
                    words[0] = 0;
                    break;
                }
            }
        }
        let [magic, width, height, depth, length, ras_type, map_type, map_length] = words;
        Self {
            magic,
            width,
            height,
            depth,
            length,
            ras_type,
            map_type,
            map_length,
        }
    }

    /// Whether the magic number matches.
    pub fn is_valid(&self) -> bool {
        self.magic == RAS_MAGIC
    }

    /// Serialize to the 32 on-disk bytes, always big-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let words = [
            self.magic,
            self.width,
            self.height,
            self.depth,
            self.length,
            self.ras_type,
            self.map_type,
            self.map_length,
        ];
        let mut out = [0u8; HEADER_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    /// Decoded encoding type, if it is one this codec knows.
    pub fn encoding(&self) -> Result<RasType, RasterError> {
        RasType::from_u32(self.ras_type).ok_or_else(|| {
            RasterError::UnsupportedVariant(format!("Sun raster type {}", self.ras_type))
        })
    }
}

/// The `ras_type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RasType {
    /// Pre-4.0 raw format; treated exactly like `Standard`.
    Old = 0,
    /// Raw pixel data, BGR order for 24/32-bit.
    Standard = 1,
    /// Run-length encoded, BGR order for 24/32-bit.
    ByteEncoded = 2,
    /// Raw pixel data in RGB order.
    Rgb = 3,
    /// Converted from TIFF; pixel data read as raw BGR.
    Tiff = 4,
    /// Converted from IFF; pixel data read as raw BGR.
    Iff = 5,
}

impl RasType {
    pub fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::Old,
            1 => Self::Standard,
            2 => Self::ByteEncoded,
            3 => Self::Rgb,
            4 => Self::Tiff,
            5 => Self::Iff,
            _ => return None,
        })
    }

    pub fn is_rle(self) -> bool {
        self == Self::ByteEncoded
    }

    /// Channel order of 24/32-bit pixels.
    pub fn channel_order(self) -> ChannelOrder {
        if self == Self::Rgb {
            ChannelOrder::Rgb
        } else {
            ChannelOrder::Bgr
        }
    }
}

/// Byte order of the three colour channels on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// The `ras_maptype` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MapType {
    None = 0,
    /// Planar RGB triplets.
    EqualRgb = 1,
    /// Opaque colormap bytes; not interpreted by this codec.
    Raw = 2,
}

impl MapType {
    pub fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::None,
            1 => Self::EqualRgb,
            2 => Self::Raw,
            _ => return None,
        })
    }
}

// ── Colormap ────────────────────────────────────────────────────────

/// Palette entries, interleaved `[r, g, b]` in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Colormap {
    entries: Vec<[u8; 3]>,
}

impl Colormap {
    /// Palette installed for 1-bit images that carry no colormap:
    /// index 0 is white, index 1 is black.
    pub const BILEVEL_DEFAULT: [[u8; 3]; 2] = [[255, 255, 255], [0, 0, 0]];

    pub fn from_entries(entries: Vec<[u8; 3]>) -> Self {
        Self { entries }
    }

    /// Identity gray ramp with `n` entries.
    pub fn gray_ramp(n: usize) -> Self {
        Self {
            entries: (0..n).map(|i| [i as u8; 3]).collect(),
        }
    }

    /// Build from planar on-disk bytes. Uses `len / 3` entries; trailing
    /// bytes that do not make up a full entry are ignored.
    pub fn from_planar(bytes: &[u8]) -> Self {
        let n = bytes.len() / 3;
        let (reds, rest) = bytes.split_at(n);
        let (greens, rest) = rest.split_at(n);
        let blues = &rest[..n];
        let entries = reds
            .iter()
            .zip(greens)
            .zip(blues)
            .map(|((&r, &g), &b)| [r, g, b])
            .collect();
        Self { entries }
    }

    /// Read the colormap announced by `header` from `src`.
    ///
    /// On a short read, or when the header announces no entries, the
    /// header's magic is cleared and `None` is returned. Bytes beyond the
    /// last full entry are skipped so the pixel data that follows stays
    /// aligned.
    pub(crate) fn read(header: &mut RasterHeader, src: &mut SliceReader<'_>) -> Option<Self> {
        let map_len = header.map_length as usize;
        let n = map_len / 3;
        let bytes = if n == 0 { None } else { src.take(n * 3) };
        let Some(bytes) = bytes else {
            header.magic = 0;
            return None;
        };
        src.skip(map_len - n * 3);
        Some(Self::from_planar(bytes))
    }

    /// Planar on-disk form.
    pub fn to_planar(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * 3);
        self.write(&mut out);
        out
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        for channel in 0..3 {
            out.extend(self.entries.iter().map(|e| e[channel]));
        }
    }

    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<[u8; 3]> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the on-disk form in bytes.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * 3
    }

    /// True if entry `i` is `(i, i, i)` for every entry.
    ///
    /// An 8-bit image with such a colormap is plain grayscale.
    pub fn is_grayscale_ramp(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, e)| i < 256 && *e == [i as u8; 3])
    }
}
