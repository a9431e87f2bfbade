//! Sun raster (`.ras`) decoder and encoder.
//!
//! Supports depths 1, 8, 24 and 32, raw and run-length encoded pixel data,
//! and RGB colormaps. Use top-level [`crate::decode`], [`crate::encode`],
//! or the request builders.

mod decode;
mod depth;
mod encode;
mod header;
pub mod rle;
mod stream;

pub use decode::Permissiveness;
pub use depth::Depth;
pub use encode::Compression;
pub use header::{
    ChannelOrder, Colormap, HEADER_LEN, MapType, RAS_MAGIC, RasType, RasterHeader,
};
pub use rle::{RleDecoder, RleEncoder};

pub(crate) use decode::{DecodeContext, parse_header};
pub(crate) use encode::EncodeContext;

use crate::decode::DecodeOutput;
use crate::error::RasterError;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

/// Decode a Sun raster file.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    ctx: &DecodeContext<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, RasterError> {
    let parsed = parse_header(data, ctx.permissiveness)?;
    if let Some(limits) = ctx.limits {
        limits.check(parsed.header.width, parsed.header.height)?;
    }
    stop.check()?;
    decode::decode_pixels(data, parsed, ctx, stop)
}

/// Encode to a Sun raster file.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    ctx: &EncodeContext<'_>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, RasterError> {
    encode::encode_sunras(pixels, width, height, layout, ctx, stop)
}
