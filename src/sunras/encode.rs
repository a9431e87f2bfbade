//! Sun raster encoder: 1/8-bit indexed, 8-bit gray, 24/32-bit colour.

use alloc::format;
use alloc::vec::Vec;

use enough::Stop;

use super::depth::Depth;
use super::header::{Colormap, HEADER_LEN, MapType, RAS_MAGIC, RasType, RasterHeader};
use super::rle::RleEncoder;
use super::stream::ByteSink;
use crate::error::RasterError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::progress::{Progress, REPORT_INTERVAL};

/// Pixel data compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Raw scanlines (`RT_STANDARD`).
    #[default]
    None,
    /// Run-length encoded (`RT_BYTE_ENCODED`).
    Rle,
}

/// Per-call encode settings.
pub(crate) struct EncodeContext<'r> {
    pub compression: Compression,
    pub palette: Option<&'r [[u8; 3]]>,
    /// Write 32-bit `0,B,G,R` pixels instead of 24-bit `B,G,R`.
    pub xrgb: bool,
    pub limits: Option<&'r Limits>,
    pub progress: Option<&'r dyn Progress>,
}

/// What goes on disk for a given input.
struct Plan {
    depth: Depth,
    colormap: Option<Colormap>,
    invert: bool,
}

const BLACK_WHITE: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];
const WHITE_BLACK: [[u8; 3]; 2] = [[255, 255, 255], [0, 0, 0]];

fn plan_for(layout: PixelLayout, ctx: &EncodeContext<'_>) -> Result<Plan, RasterError> {
    if layout.has_alpha() {
        return Err(RasterError::AlphaNotSupported(layout));
    }
    Ok(match layout {
        PixelLayout::Gray8 => Plan {
            depth: Depth::Indexed,
            colormap: Some(Colormap::gray_ramp(256)),
            invert: false,
        },
        PixelLayout::Indexed8 => {
            let palette = ctx.palette.ok_or_else(|| {
                RasterError::InvalidData("Indexed8 encode requires a palette".into())
            })?;
            if palette.is_empty() || palette.len() > 256 {
                return Err(RasterError::InvalidData(format!(
                    "palette must have 1 to 256 entries, got {}",
                    palette.len()
                )));
            }
            if palette.len() == 2 {
                // Sun tools read bit 1 as black when there is no colormap.
                let is_bw = palette[..] == BLACK_WHITE[..];
                let is_wb = palette[..] == WHITE_BLACK[..];
                Plan {
                    depth: Depth::Bilevel,
                    colormap: (!is_bw && !is_wb).then(|| Colormap::from_entries(palette.to_vec())),
                    invert: is_bw,
                }
            } else {
                Plan {
                    depth: Depth::Indexed,
                    colormap: Some(Colormap::from_entries(palette.to_vec())),
                    invert: false,
                }
            }
        }
        PixelLayout::Rgb8 | PixelLayout::Bgr8 | PixelLayout::Bgrx8 => Plan {
            depth: if ctx.xrgb { Depth::Xrgb } else { Depth::Rgb },
            colormap: None,
            invert: false,
        },
        _ => {
            return Err(RasterError::UnsupportedVariant(format!(
                "cannot encode {:?} as Sun raster",
                layout
            )));
        }
    })
}

/// Encode pixels to a complete Sun raster file.
pub(crate) fn encode_sunras(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    ctx: &EncodeContext<'_>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, RasterError> {
    let plan = plan_for(layout, ctx)?;

    if width == 0 || height == 0 {
        return Err(RasterError::InvalidData(format!(
            "cannot encode a {width}x{height} image"
        )));
    }

    let w = width as usize;
    let h = height as usize;
    let row_bytes = w
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let expected = row_bytes
        .checked_mul(h)
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(RasterError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let line_bytes = plan
        .depth
        .bytes_per_line(w)
        .map(|bpl| bpl + plan.depth.line_pad(w))
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let raw_size = line_bytes
        .checked_mul(h)
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;

    let map_length = plan.colormap.as_ref().map_or(0, Colormap::byte_len);
    if let Some(limits) = ctx.limits {
        limits.check(width, height)?;
        limits.check_memory(HEADER_LEN + map_length + raw_size)?;
    }
    let header = RasterHeader {
        magic: RAS_MAGIC,
        width,
        height,
        depth: plan.depth.bits(),
        length: 0, // filled in once the pixel data is written
        ras_type: match ctx.compression {
            Compression::None => RasType::Standard as u32,
            Compression::Rle => RasType::ByteEncoded as u32,
        },
        map_type: if map_length > 0 {
            MapType::EqualRgb as u32
        } else {
            MapType::None as u32
        },
        map_length: map_length as u32,
    };

    tracing::debug!(
        width,
        height,
        depth = header.depth,
        rle = ctx.compression == Compression::Rle,
        colors = map_length / 3,
        "encoding Sun raster"
    );

    let mut out = Vec::with_capacity(HEADER_LEN + map_length + raw_size);
    header.write(&mut out);
    if let Some(map) = &plan.colormap {
        map.write(&mut out);
    }

    stop.check()?;

    let data_start = out.len();
    let rows = &pixels[..expected];
    match ctx.compression {
        Compression::None => write_rows(&mut out, rows, row_bytes, layout, &plan, ctx, stop)?,
        Compression::Rle => {
            let mut enc = RleEncoder::new(&mut out);
            write_rows(&mut enc, rows, row_bytes, layout, &plan, ctx, stop)?;
            enc.finish();
        }
    }

    let data_len = u32::try_from(out.len() - data_start)
        .map_err(|_| RasterError::DimensionsTooLarge { width, height })?;
    out[16..20].copy_from_slice(&data_len.to_be_bytes());

    Ok(out)
}

fn write_rows<K: ByteSink>(
    sink: &mut K,
    rows: &[u8],
    row_bytes: usize,
    layout: PixelLayout,
    plan: &Plan,
    ctx: &EncodeContext<'_>,
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    let height = rows.len() / row_bytes;
    let mut line = Vec::new();

    for (row_idx, row) in rows.chunks_exact(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        if let Some(progress) = ctx.progress {
            if row_idx % REPORT_INTERVAL == 0 {
                progress.report(row_idx as f32 / height as f32);
            }
        }
        plan.depth.encode_row(row, layout, plan.invert, &mut line, sink);
    }

    Ok(())
}
