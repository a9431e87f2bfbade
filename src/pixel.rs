/// Pixel memory layout.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 8-bit palette index. Pixel values index a colormap.
    Indexed8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 | Self::Indexed8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Indexed8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 => 4,
        }
    }

    /// Whether the layout carries a real alpha channel.
    ///
    /// `Bgrx8` does not: its 4th byte is padding.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba8 | Self::Bgra8)
    }

    /// Whether this layout has the same memory representation as `other`.
    ///
    /// For example, `Bgra8` and `Bgrx8` are compatible (same 4-byte B,G,R,X/A layout).
    pub fn is_memory_compatible(&self, other: PixelLayout) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::Bgra8, Self::Bgrx8) | (Self::Bgrx8, Self::Bgra8)
        )
    }
}

/// Pixel types that a [`crate::DecodeOutput`] can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// The layout this pixel type corresponds to.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::Gray<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Gray8
    }
}
