use std::sync::Arc;

use crate::{
    assets::decode::premultiply_rgba8_in_place,
    foundation::error::{SquareError, SquareResult},
};

#[derive(Clone, PartialEq, Eq)]
/// Immutable decoded raster in premultiplied RGBA8 form.
///
/// Both dimensions are always non-zero. Clones share the pixel buffer.
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap row-major premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> SquareResult<Self> {
        if width == 0 || height == 0 {
            return Err(SquareError::invalid_source(format!(
                "source dimensions must be non-zero (got {width}x{height})"
            )));
        }
        let expected_len = rgba8_len(width, height)?;
        if rgba8_premul.len() != expected_len {
            return Err(SquareError::invalid_source(format!(
                "source buffer holds {} bytes, expected {expected_len} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Wrap row-major straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> SquareResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// Convert a decoded `image` buffer (straight alpha).
    pub fn from_rgba_image(img: image::RgbaImage) -> SquareResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_straight_rgba8(width, height, img.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Side of the square canvas this image composites onto.
    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn shorter_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba8_premul_len", &self.rgba8_premul.len())
            .finish()
    }
}

pub(crate) fn rgba8_len(width: u32, height: u32) -> SquareResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SquareError::invalid_source("rgba8 buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
