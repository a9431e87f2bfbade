use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::RasterError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::progress::Progress;
use crate::sunras::{self, DecodeContext, Permissiveness};

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    palette: Option<Vec<[u8; 3]>>,
    /// The file ended before all pixel data was read. Missing pixels are zero.
    pub truncated: bool,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Colormap for [`PixelLayout::Indexed8`] output, `None` otherwise.
    pub fn palette(&self) -> Option<&[[u8; 3]]> {
        self.palette.as_deref()
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            palette: self.palette,
            truncated: self.truncated,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub(crate) fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        palette: Option<Vec<[u8; 3]>>,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
            palette,
            truncated: false,
        }
    }

    pub(crate) fn owned(
        data: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        palette: Option<Vec<[u8; 3]>>,
    ) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
            palette,
            truncated: false,
        }
    }

    /// Expand to packed RGB, looking indices up in the palette and
    /// replicating gray levels.
    ///
    /// Indices past the end of the palette map to black.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let pixels = self.pixels();
        match self.layout {
            PixelLayout::Rgb8 => pixels.to_vec(),
            PixelLayout::Gray8 => pixels.iter().flat_map(|&v| [v, v, v]).collect(),
            PixelLayout::Indexed8 => {
                let palette = self.palette().unwrap_or(&[]);
                pixels
                    .iter()
                    .flat_map(|&i| palette.get(usize::from(i)).copied().unwrap_or([0; 3]))
                    .collect()
            }
            PixelLayout::Bgr8 => pixels
                .chunks_exact(3)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect(),
            PixelLayout::Rgba8 => pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            PixelLayout::Bgra8 | PixelLayout::Bgrx8 => pixels
                .chunks_exact(4)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect(),
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`RasterError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], RasterError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if !self.layout.is_memory_compatible(P::layout()) {
            return Err(RasterError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, RasterError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, RasterError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for a single decode.
///
/// ```no_run
/// use zenraster::{DecodeRequest, Limits, Permissiveness, Unstoppable};
///
/// let data: &[u8] = &[]; // your .ras bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenraster::RasterError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
    progress: Option<&'a dyn Progress>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
            progress: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Attach a progress sink. Without one, nothing is reported.
    pub fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, RasterError> {
        let ctx = DecodeContext {
            limits: self.limits,
            permissiveness: self.permissiveness,
            progress: self.progress,
        };
        sunras::decode(self.data, &ctx, &stop)
    }
}
