use image::{Rgba, RgbaImage};

#[cfg(feature = "vectorizer-vtracer")]
use vtracer::ColorImage;

use crate::{PixtraceError, PixtraceResult};

/// Row-major RGBA samples of a decoded image.
///
/// The buffer always holds exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a raw RGBA buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PixtraceResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(data.len()) {
            return Err(PixtraceError::PixelLength {
                width,
                height,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba_image(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
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

    /// Get the flat RGBA sample buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Copy the samples into an `RgbaImage` for use with `image`/`imageproc` operations.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
            Rgba([
                self.data[idx],
                self.data[idx + 1],
                self.data[idx + 2],
                self.data[idx + 3],
            ])
        })
    }

    /// Convert the grid into the color image type consumed by VTracer.
    #[cfg(feature = "vectorizer-vtracer")]
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            pixels: self.data.clone(),
            width: self.width as usize,
            height: self.height as usize,
        }
    }
}
