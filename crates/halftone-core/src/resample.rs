//! Image resampling.
//!
//! The pipeline only needs "give me this buffer at exactly `w x h`", so the
//! resampler is a trait and callers may plug in their own. [`Bilinear`] is
//! the default: bilinear interpolation with pixel-center alignment, the
//! convention of OpenCV's `INTER_LINEAR`.

use crate::buffer::SampleBuffer;

/// Resample a buffer to an exact target size.
pub trait Resample {
    /// Returned buffer is exactly `width x height`.
    fn resize(&self, buffer: &SampleBuffer, width: usize, height: usize) -> SampleBuffer;
}

/// Bilinear resampler with pixel-center alignment and clamped edges.
///
/// Resizing to the current size returns the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bilinear;

/// Source taps for one destination coordinate.
#[derive(Debug, Clone, Copy)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

fn taps(len_in: usize, len_out: usize) -> Vec<Tap> {
    let ratio = len_in as f64 / len_out as f64;
    let last = len_in.saturating_sub(1);
    (0..len_out)
        .map(|i| {
            let src = ((i as f64 + 0.5) * ratio - 0.5).clamp(0.0, last as f64);
            let lo = src.floor() as usize;
            Tap {
                lo,
                hi: (lo + 1).min(last),
                frac: (src - lo as f64) as f32,
            }
        })
        .collect()
}

impl Resample for Bilinear {
    fn resize(&self, buffer: &SampleBuffer, width: usize, height: usize) -> SampleBuffer {
        if buffer.width() == width && buffer.height() == height {
            return buffer.clone();
        }
        if buffer.is_empty() {
            return SampleBuffer::filled(width, height, 0.0);
        }

        let xs = taps(buffer.width(), width);
        let ys = taps(buffer.height(), height);

        SampleBuffer::from_fn(width, height, |x, y| {
            let tx = xs[x];
            let ty = ys[y];
            let top = lerp(buffer.get(tx.lo, ty.lo), buffer.get(tx.hi, ty.lo), tx.frac);
            let bottom = lerp(buffer.get(tx.lo, ty.hi), buffer.get(tx.hi, ty.hi), tx.frac);
            lerp(top, bottom, ty.frac)
        })
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
