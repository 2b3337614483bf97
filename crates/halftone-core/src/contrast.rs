//! Contrast normalization.
//!
//! Stretches a buffer affinely so its darkest sample becomes 0 and its
//! brightest becomes 255. Every mode runs this once at entry, so the rest of
//! the pipeline can rely on the `[0, 255]` brightness domain.

use crate::buffer::SampleBuffer;

/// Brightness assigned to every sample of a constant image.
pub const NEUTRAL_GRAY: f32 = 128.0;

/// Result of [`normalize`].
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The stretched buffer, min 0 and max 255 (or constant gray).
    pub buffer: SampleBuffer,
    /// Set when the input had no contrast to stretch.
    pub degenerate: bool,
}

/// Map `[min, max]` of `buffer` onto `[0, 255]`, optionally inverting first.
///
/// A constant input has no defined stretch factor. It is replaced by a
/// constant [`NEUTRAL_GRAY`] buffer and `degenerate` is set.
pub fn normalize(buffer: &SampleBuffer, invert: bool) -> Normalized {
    let signed = if invert {
        buffer.map(|v| -v)
    } else {
        buffer.clone()
    };

    let Some((min, max)) = signed.min_max() else {
        return Normalized {
            buffer: signed,
            degenerate: false,
        };
    };

    if max == min {
        tracing::warn!(
            value = min,
            width = buffer.width(),
            height = buffer.height(),
            "Image has constant brightness, using neutral gray"
        );
        return Normalized {
            buffer: SampleBuffer::filled(buffer.width(), buffer.height(), NEUTRAL_GRAY),
            degenerate: true,
        };
    }

    let range = max - min;
    Normalized {
        buffer: signed.map(|v| ((v - min) * 255.0 / range).clamp(0.0, 255.0)),
        degenerate: false,
    }
}
