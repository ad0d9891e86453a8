//! Binary object masks.

use image::GrayImage;

use crate::error::Mask2CocoError;

/// A 2-D binary raster marking one object's extent within an image.
///
/// Pixels are stored row-major as `0` (background) or `1` (foreground).
/// Construction through [`BinaryMask::new`] rejects anything that is not a
/// `width * height` buffer of zeros and ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Creates a mask from a row-major buffer of 0/1 values.
    ///
    /// # Errors
    /// Returns [`Mask2CocoError::InvalidMask`] if the buffer length does not
    /// match the dimensions or if any value is neither 0 nor 1.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Mask2CocoError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Mask2CocoError::invalid_mask(format!(
                "buffer holds {} values but a {}x{} mask needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        if let Some(pos) = data.iter().position(|&v| v > 1) {
            return Err(Mask2CocoError::invalid_mask(format!(
                "value {} at pixel ({}, {}) is not binary",
                data[pos],
                pos % width.max(1) as usize,
                pos / width.max(1) as usize
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a mask by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(u8::from(f(x, y)));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Creates an all-background mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| false)
    }

    /// Converts an 8-bit grayscale image; any nonzero pixel is foreground.
    pub fn from_luma(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image.as_raw().iter().map(|&v| u8::from(v != 0)).collect();
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if pixel `(x, y)` is foreground. Out-of-range pixels
    /// read as background.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y as usize * self.width as usize + x as usize] != 0
    }

    /// Row-major pixel buffer of 0/1 values.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
