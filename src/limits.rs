use alloc::format;

use crate::error::RasterError;

/// Resource caps for a decode or encode.
///
/// Sun raster headers carry 32-bit dimensions, so a 60-byte file can claim a
/// multi-gigabyte image. All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the one buffer a call allocates: the decoded
    /// raster, or the uncompressed output file when encoding.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions before anything is allocated.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), RasterError> {
        let (width, height) = (u64::from(width), u64::from(height));
        exceeds("width", width, self.max_width)?;
        exceeds("height", height, self.max_height)?;
        exceeds("pixel count", width * height, self.max_pixels)
    }

    /// Check the size of the output buffer.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), RasterError> {
        exceeds("buffer size", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, max: Option<u64>) -> Result<(), RasterError> {
    match max {
        Some(max) if value > max => Err(RasterError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
