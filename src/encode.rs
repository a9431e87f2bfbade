use alloc::vec::Vec;

use enough::Stop;

use crate::error::RasterError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::progress::Progress;
use crate::sunras::{self, Compression, EncodeContext};

/// Builder for a single encode.
///
/// Gray input is written as depth 8 with an identity colormap, indexed input
/// as depth 8 (or depth 1 for two-colour palettes), colour input as depth 24,
/// or depth 32 with [`with_32bit`](Self::with_32bit).
#[derive(Clone, Copy)]
pub struct EncodeRequest<'a> {
    compression: Compression,
    palette: Option<&'a [[u8; 3]]>,
    xrgb: bool,
    limits: Option<&'a Limits>,
    progress: Option<&'a dyn Progress>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(compression: Compression) -> Self {
        Self {
            compression,
            palette: None,
            xrgb: false,
            limits: None,
            progress: None,
        }
    }

    /// Raw scanlines.
    pub fn standard() -> Self {
        Self::new(Compression::None)
    }

    /// Run-length encoded scanlines.
    pub fn rle() -> Self {
        Self::new(Compression::Rle)
    }

    /// Colormap for [`PixelLayout::Indexed8`] input (1 to 256 entries).
    pub fn with_palette(mut self, palette: &'a [[u8; 3]]) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Write colour images as 32-bit `0,B,G,R` pixels.
    pub fn with_32bit(mut self, enabled: bool) -> Self {
        self.xrgb = enabled;
        self
    }

    /// Refuse to encode images outside `limits`. `max_memory_bytes` caps
    /// the size of the raw (uncompressed) output file.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    fn context(&self) -> EncodeContext<'a> {
        EncodeContext {
            compression: self.compression,
            palette: self.palette,
            xrgb: self.xrgb,
            limits: self.limits,
            progress: self.progress,
        }
    }

    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, RasterError> {
        sunras::encode(pixels, width, height, layout, &self.context(), &stop)
    }

    /// Encode and write the whole file to `writer`.
    ///
    /// Nothing is written if encoding fails.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<(), RasterError> {
        let encoded = self.encode(pixels, width, height, layout, stop)?;
        writer.write_all(&encoded)?;
        Ok(())
    }
}
