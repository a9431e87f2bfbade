use crate::error::RasterError;
use crate::pixel::PixelLayout;
use crate::sunras::{self, Compression, Depth, Permissiveness};

/// Header information, read without decoding pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Bits per pixel on disk.
    pub depth: Depth,
    pub compression: Compression,
    /// Layout a full decode would produce.
    pub native_layout: PixelLayout,
    /// Colormap entries in the file (0 when there is none).
    pub colors: usize,
}

impl ImageInfo {
    /// Probe a Sun raster header and colormap.
    ///
    /// Unsupported colormap types are skipped rather than rejected, so a file
    /// a strict decode would refuse can still be probed.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RasterError> {
        let parsed = sunras::parse_header(data, Permissiveness::Permissive)?;
        let (native_layout, _) = parsed.output_layout();
        Ok(Self {
            width: parsed.header.width,
            height: parsed.header.height,
            depth: parsed.depth,
            compression: if parsed.ras_type.is_rle() {
                Compression::Rle
            } else {
                Compression::None
            },
            native_layout,
            colors: parsed.colormap.as_ref().map_or(0, |map| map.len()),
        })
    }
}
