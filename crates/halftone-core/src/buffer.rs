//! Grayscale sample buffers.
//!
//! [`SampleBuffer`] stores one `f32` brightness per pixel in row-major order.
//! Decoded images enter as 8-bit samples; after contrast normalization the
//! values are real-valued but stay inside `[0, 255]`.

use crate::error::HalftoneError;

/// A 2-D grid of brightness values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl SampleBuffer {
    /// Wrap raw samples. Fails if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, HalftoneError> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            HalftoneError::invalid_grid(format!("{width}x{height} samples overflow"))
        })?;
        if data.len() != expected {
            return Err(HalftoneError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from 8-bit luma samples (the decoder's output format).
    pub fn from_luma8(width: usize, height: usize, luma: &[u8]) -> Result<Self, HalftoneError> {
        Self::new(width, height, luma.iter().map(|&v| v as f32).collect())
    }

    /// A buffer where every sample is `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
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
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Smallest and largest sample, or `None` for an empty buffer.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.height, self.width, |x, y| self.get(y, x))
    }

    /// Apply `f` to every sample.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}
