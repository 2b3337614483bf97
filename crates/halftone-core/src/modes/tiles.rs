//! Mosaic of circles or squares sized in cell units.
//!
//! Floors and border are ratios of one cell. A tile's size is computed in
//! cell units and then scaled by the original cell extent on each axis, so
//! circles become ellipses when the cells are not square.

use crate::aggregate::cell_means;
use crate::buffer::SampleBuffer;
use crate::contrast::normalize;
use crate::error::HalftoneError;
use crate::geometry::{Drawing, Shape};
use crate::grid::GridSpec;
use crate::modes::cell_center;
use crate::options::{TileOptions, TileShape};
use crate::params::tile_extent;
use crate::resample::Resample;

pub fn render(
    buffer: &SampleBuffer,
    options: &TileOptions,
    resampler: &dyn Resample,
) -> Result<Drawing, HalftoneError> {
    options.validate()?;
    let grid = GridSpec::new(
        buffer.width(),
        buffer.height(),
        options.cells_h,
        options.cells_v,
    )?;
    let (extent_h, extent_v) = (grid.extent_h(), grid.extent_v());

    tracing::debug!(
        cells_h = grid.cells_h,
        cells_v = grid.cells_v,
        shape = %options.shape,
        "Partitioned tile grid"
    );

    let normalized = normalize(buffer, options.invert);
    let resized = resampler.resize(&normalized.buffer, grid.width_out, grid.height_out);
    let means = cell_means(&resized, &grid)?;

    let border_h = options.border * extent_h;
    let border_v = options.border * extent_v;
    let mut drawing = Drawing::new(grid.width_in as f64, grid.height_in as f64, border_h, border_v);

    for row in 0..means.rows() {
        for col in 0..means.cols() {
            let size = tile_extent(
                means.get(row, col),
                1.0,
                options.min_thick,
                options.min_tile_size,
            );
            let (width, height) = (size * extent_h, size * extent_v);
            if width <= 0.0 || height <= 0.0 {
                continue;
            }
            let center = cell_center(row, col, extent_h, extent_v);
            drawing.push(match options.shape {
                TileShape::Circle => Shape::Ellipse {
                    cx: center.x,
                    cy: center.y,
                    rx: width / 2.0,
                    ry: height / 2.0,
                },
                TileShape::Square => Shape::Rect {
                    x: center.x - width / 2.0,
                    y: center.y - height / 2.0,
                    width,
                    height,
                },
            });
        }
    }

    tracing::debug!(
        shapes = drawing.shapes.len(),
        cells = means.rows() * means.cols(),
        "Assembled tiles"
    );
    Ok(drawing.translate(border_h, border_v))
}
