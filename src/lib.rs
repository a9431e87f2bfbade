//! # zenraster
//!
//! Sun raster (`.ras`, `.sun`, `.im1`, `.im8`, `.im24`, `.im32`) decoder and
//! encoder.
//!
//! ## Supported Files
//!
//! - **Depth 1**: bilevel, with or without a 2-entry colormap
//! - **Depth 8**: indexed with an RGB colormap, or grayscale when the
//!   colormap is absent or an identity ramp
//! - **Depth 24**: BGR (or RGB for `RT_FORMAT_RGB` files)
//! - **Depth 32**: padding byte followed by BGR/RGB
//!
//! Raw (`RT_STANDARD`, `RT_OLD`) and run-length encoded (`RT_BYTE_ENCODED`)
//! pixel data are both read and written.
//!
//! ## Zero-Copy Decoding
//!
//! Raw depth-8 files, and depth-24 RGB-order files, whose scanlines need no
//! alignment padding decode to a borrowed slice of the input. Everything else
//! (bit expansion, BGR swizzle, RLE, padded rows) allocates.
//!
//! ## Truncated Files
//!
//! A file whose pixel data ends early still decodes: the missing pixels are
//! zero and [`DecodeOutput::truncated`] is set. Use
//! [`Permissiveness::Strict`] to get [`RasterError::UnexpectedEof`] instead.
//!
//! ## Usage
//!
//! ```no_run
//! use zenraster::{DecodeRequest, EncodeRequest, ImageInfo};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your .ras bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.depth);
//!
//! // Decode (zero-copy when possible)
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! let rgb = decoded.to_rgb8();
//!
//! // Re-encode with RLE
//! let encoded = EncodeRequest::rle()
//!     .encode(&rgb, decoded.width, decoded.height,
//!             zenraster::PixelLayout::Rgb8, Unstoppable)?;
//! # Ok::<(), zenraster::RasterError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;
mod progress;

pub mod sunras;

mod decode;
mod encode;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::RasterError;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use progress::Progress;
pub use sunras::{Compression, Depth, Permissiveness};

use alloc::vec::Vec;

/// Decode a Sun raster file with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, RasterError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a Sun raster file, rejecting images outside `limits`.
pub fn decode_with_limits<'a>(
    data: &'a [u8],
    limits: &'a Limits,
    stop: impl Stop,
) -> Result<DecodeOutput<'a>, RasterError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Encode raw scanlines.
///
/// `Indexed8` input needs a palette; use [`EncodeRequest::with_palette`].
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, RasterError> {
    EncodeRequest::standard().encode(pixels, width, height, layout, stop)
}

/// Encode run-length compressed scanlines.
pub fn encode_rle(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, RasterError> {
    EncodeRequest::rle().encode(pixels, width, height, layout, stop)
}

/// Read a whole Sun raster file from `reader` and decode it.
#[cfg(feature = "std")]
pub fn read_sunras<R: std::io::Read>(
    mut reader: R,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, RasterError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data, stop)?.into_owned())
}

/// Encode raw scanlines and write them to `writer`.
#[cfg(feature = "std")]
pub fn write_sunras<W: std::io::Write>(
    writer: &mut W,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<(), RasterError> {
    EncodeRequest::standard().write_to(writer, pixels, width, height, layout, stop)
}
