//! Sun raster loader: header, colormap, then one scanline at a time.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::depth::Depth;
use super::header::{ChannelOrder, Colormap, MapType, RasType, RasterHeader};
use super::rle::RleDecoder;
use super::stream::{ByteSource, SliceReader};
use crate::decode::DecodeOutput;
use crate::error::RasterError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::progress::{Progress, REPORT_INTERVAL};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Reject truncated pixel data and colormap lengths that are not a
    /// multiple of 3.
    Strict,

    /// Default behavior. Truncated pixel data is zero-filled and flagged
    /// through [`DecodeOutput::truncated`]. Unsupported colormap types are
    /// rejected.
    #[default]
    Standard,

    /// Like `Standard`, but a colormap of unsupported type is stepped over
    /// instead of rejected.
    Permissive,
}

/// Per-call decode settings. Nothing here outlives one decode.
pub(crate) struct DecodeContext<'r> {
    pub limits: Option<&'r Limits>,
    pub permissiveness: Permissiveness,
    pub progress: Option<&'r dyn Progress>,
}

// ── Parsed header info ──────────────────────────────────────────────

pub(crate) struct ParsedHeader {
    pub header: RasterHeader,
    pub depth: Depth,
    pub ras_type: RasType,
    pub colormap: Option<Colormap>,
    /// Offset of the first pixel byte.
    pub data_offset: usize,
}

impl ParsedHeader {
    /// Layout and palette of the decoded raster.
    pub fn output_layout(&self) -> (PixelLayout, Option<Vec<[u8; 3]>>) {
        match self.depth {
            Depth::Bilevel => {
                let palette = match &self.colormap {
                    Some(map) => map.entries().to_vec(),
                    None => Colormap::BILEVEL_DEFAULT.to_vec(),
                };
                (PixelLayout::Indexed8, Some(palette))
            }
            Depth::Indexed => match &self.colormap {
                Some(map) if !map.is_grayscale_ramp() => {
                    (PixelLayout::Indexed8, Some(map.entries().to_vec()))
                }
                _ => (PixelLayout::Gray8, None),
            },
            Depth::Rgb | Depth::Xrgb => (PixelLayout::Rgb8, None),
        }
    }
}

/// Parse the header and colormap.
pub(crate) fn parse_header(
    data: &[u8],
    permissiveness: Permissiveness,
) -> Result<ParsedHeader, RasterError> {
    let mut src = SliceReader::new(data);
    let mut header = RasterHeader::read_from(&mut src);
    if !header.is_valid() {
        return Err(RasterError::UnrecognizedFormat);
    }

    let ras_type = header.encoding()?;
    let depth = Depth::from_bits(header.depth).ok_or_else(|| {
        RasterError::UnsupportedVariant(format!("Sun raster depth {}", header.depth))
    })?;

    if header.width == 0 {
        return Err(RasterError::InvalidHeader("Sun raster width is zero".into()));
    }
    if header.height == 0 {
        return Err(RasterError::InvalidHeader("Sun raster height is zero".into()));
    }

    let colormap = match MapType::from_u32(header.map_type) {
        _ if header.map_length == 0 => None,
        Some(MapType::EqualRgb) => {
            if permissiveness == Permissiveness::Strict && header.map_length % 3 != 0 {
                return Err(RasterError::InvalidHeader(format!(
                    "colormap length {} is not a multiple of 3",
                    header.map_length
                )));
            }
            if header.map_length < 3 {
                return Err(RasterError::InvalidHeader(format!(
                    "colormap length {} is too short to hold an entry",
                    header.map_length
                )));
            }
            let map = Colormap::read(&mut header, &mut src);
            match map {
                Some(map) if header.is_valid() => Some(map),
                _ => {
                    return Err(RasterError::InvalidHeader(
                        "colormap entries truncated".into(),
                    ));
                }
            }
        }
        _ if permissiveness == Permissiveness::Permissive => {
            tracing::warn!(
                map_type = header.map_type,
                map_length = header.map_length,
                "skipping unsupported Sun raster colormap"
            );
            src.skip(header.map_length as usize);
            None
        }
        _ => {
            return Err(RasterError::UnsupportedVariant(format!(
                "Sun raster colormap type {}",
                header.map_type
            )));
        }
    };

    tracing::debug!(
        width = header.width,
        height = header.height,
        depth = header.depth,
        ras_type = header.ras_type,
        colors = colormap.as_ref().map_or(0, Colormap::len),
        "parsed Sun raster header"
    );

    Ok(ParsedHeader {
        header,
        depth,
        ras_type,
        colormap,
        data_offset: src.position(),
    })
}

// ── Full decode ─────────────────────────────────────────────────────

pub(crate) fn decode_pixels<'a>(
    data: &'a [u8],
    parsed: ParsedHeader,
    ctx: &DecodeContext<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, RasterError> {
    let width = parsed.header.width;
    let height = parsed.header.height;
    let w = width as usize;
    let h = height as usize;
    let (layout, palette) = parsed.output_layout();

    let row_bytes = w
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let out_bytes = row_bytes
        .checked_mul(h)
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = ctx.limits {
        limits.check_memory(out_bytes)?;
    }

    stop.check()?;

    let pixel_data = &data[parsed.data_offset..];
    let order = parsed.ras_type.channel_order();

    // Zero-copy path: raw, unpadded rows already in output layout.
    let native = match parsed.depth {
        Depth::Indexed => true,
        Depth::Rgb => order == ChannelOrder::Rgb,
        Depth::Bilevel | Depth::Xrgb => false,
    };
    if native
        && !parsed.ras_type.is_rle()
        && parsed.depth.line_pad(w) == 0
        && pixel_data.len() >= out_bytes
    {
        if let Some(progress) = ctx.progress {
            progress.report(1.0);
        }
        return Ok(DecodeOutput::borrowed(
            &pixel_data[..out_bytes],
            width,
            height,
            layout,
            palette,
        ));
    }

    let mut pixels = vec![0u8; out_bytes];
    let complete = if parsed.ras_type.is_rle() {
        let mut src = RleDecoder::new(pixel_data);
        decode_rows(&mut src, parsed.depth, order, &mut pixels, row_bytes, ctx, stop)?
    } else {
        let mut src = SliceReader::new(pixel_data);
        decode_rows(&mut src, parsed.depth, order, &mut pixels, row_bytes, ctx, stop)?
    };

    let mut output = DecodeOutput::owned(pixels, width, height, layout, palette);
    if !complete {
        if ctx.permissiveness == Permissiveness::Strict {
            return Err(RasterError::UnexpectedEof);
        }
        tracing::warn!(width, height, "EOF encountered reading Sun raster pixel data");
        output.truncated = true;
    }
    Ok(output)
}

/// Decode every scanline. Returns false if any row came up short.
fn decode_rows<S: ByteSource>(
    src: &mut S,
    depth: Depth,
    order: ChannelOrder,
    pixels: &mut [u8],
    row_bytes: usize,
    ctx: &DecodeContext<'_>,
    stop: &dyn Stop,
) -> Result<bool, RasterError> {
    let height = pixels.len() / row_bytes;
    let mut complete = true;

    for (row_idx, row) in pixels.chunks_exact_mut(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        complete &= depth.decode_row(src, order, row);

        if let Some(progress) = ctx.progress {
            if row_idx % REPORT_INTERVAL == 0 || row_idx + 1 == height {
                progress.report((row_idx + 1) as f32 / height as f32);
            }
        }
    }

    Ok(complete)
}
