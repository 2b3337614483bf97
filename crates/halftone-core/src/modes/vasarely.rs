//! Two-tone threshold band pattern.
//!
//! Unlike the vector modes this one produces pixels. The resized image is cut
//! into bands of one period each. Within a band, every pixel compares the
//! mean brightness of its row segment against a fixed threshold curve: the
//! darker the segment, the fewer pixels clear the curve and the wider the
//! black band grows around the period edges.

use crate::aggregate::band_means;
use crate::buffer::SampleBuffer;
use crate::contrast::normalize;
use crate::error::HalftoneError;
use crate::grid::VasarelyGrid;
use crate::options::{Axis, VasarelyOptions};
use crate::params::{threshold_pattern, WHITE};
use crate::raster::RasterImage;
use crate::resample::Resample;

pub fn render(
    buffer: &SampleBuffer,
    options: &VasarelyOptions,
    resampler: &dyn Resample,
) -> Result<RasterImage, HalftoneError> {
    options.validate()?;
    match options.axis {
        Axis::Vertical => render_canonical(buffer, options, resampler),
        Axis::Horizontal => {
            Ok(render_canonical(&buffer.transpose(), options, resampler)?.transpose())
        }
    }
}

fn render_canonical(
    buffer: &SampleBuffer,
    options: &VasarelyOptions,
    resampler: &dyn Resample,
) -> Result<RasterImage, HalftoneError> {
    let grid = VasarelyGrid::new(buffer.width(), buffer.height(), options.n_bands)?;
    let pattern = threshold_pattern(grid.half_band, options.min_space, options.min_band)?;
    let period = grid.period();

    tracing::debug!(
        n_bands = grid.n_bands,
        period,
        width_out = grid.width_out,
        height_out = grid.height_out,
        "Partitioned threshold bands"
    );

    let normalized = normalize(buffer, options.invert);
    let resized = resampler.resize(&normalized.buffer, grid.width_out, grid.height_out);
    let means = band_means(&resized, grid.n_bands, period)?;

    let thresholded = SampleBuffer::from_fn(grid.width_out, grid.height_out, |x, y| {
        let level = means.get(y, x / period) / WHITE;
        if level > pattern[x % period] {
            255.0
        } else {
            0.0
        }
    });

    let output = if options.restore_size && !grid.is_identity() {
        tracing::debug!(
            width = grid.width_in,
            height = grid.height_in,
            "Restoring input size"
        );
        resampler.resize(&thresholded, grid.width_in, grid.height_in)
    } else {
        thresholded
    };

    Ok(RasterImage::from_samples(&output))
}
