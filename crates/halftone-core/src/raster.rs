//! 8-bit grayscale raster output of the threshold pattern mode.

use crate::buffer::SampleBuffer;

/// Grayscale image, one byte per pixel in row-major order.
///
/// # Example
///
/// ```
/// use halftone_core::{RasterImage, SampleBuffer};
///
/// let samples = SampleBuffer::new(2, 1, vec![-4.0, 254.6]).unwrap();
/// let image = RasterImage::from_samples(&samples);
///
/// assert_eq!(image.width(), 2);
/// assert_eq!(image.pixels(), &[0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl RasterImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == width * height`.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width * height,
            "pixels length ({}) must match width * height ({}x{})",
            pixels.len(),
            width,
            height,
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Quantize samples to bytes: round half to even, clamp to `[0, 255]`.
    pub fn from_samples(buffer: &SampleBuffer) -> Self {
        let pixels = buffer
            .data()
            .iter()
            .map(|&v| v.round_ties_even().clamp(0.0, 255.0) as u8)
            .collect();
        Self::new(pixels, buffer.width(), buffer.height())
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for x in 0..self.width {
            for y in 0..self.height {
                pixels.push(self.get(x, y));
            }
        }
        Self::new(pixels, self.height, self.width)
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
