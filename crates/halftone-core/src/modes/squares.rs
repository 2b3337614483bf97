//! Grid of variable-size rectangles with absolute pixel floors.
//!
//! Each cell holds one rectangle centered in the cell. Width and height are
//! sized independently from the cell's own extent on that axis, so cells
//! that are not square produce rectangles with the same aspect.

use crate::aggregate::cell_means;
use crate::buffer::SampleBuffer;
use crate::contrast::normalize;
use crate::error::HalftoneError;
use crate::geometry::{Drawing, Shape};
use crate::grid::GridSpec;
use crate::modes::cell_center;
use crate::options::SquareOptions;
use crate::params::tile_extent;
use crate::resample::Resample;

pub fn render(
    buffer: &SampleBuffer,
    options: &SquareOptions,
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
        extent_h,
        extent_v,
        "Partitioned square grid"
    );

    let normalized = normalize(buffer, options.invert);
    let resized = resampler.resize(&normalized.buffer, grid.width_out, grid.height_out);
    let means = cell_means(&resized, &grid)?;

    let mut drawing = Drawing::new(
        grid.width_in as f64,
        grid.height_in as f64,
        options.border,
        options.border,
    );
    let mut omitted = 0usize;

    for row in 0..means.rows() {
        for col in 0..means.cols() {
            let v = means.get(row, col);
            let width = tile_extent(v, extent_h, options.min_thick, options.min_square_size);
            let height = tile_extent(v, extent_v, options.min_thick, options.min_square_size);
            if width <= 0.0 || height <= 0.0 {
                omitted += 1;
                continue;
            }
            let center = cell_center(row, col, extent_h, extent_v);
            drawing.push(Shape::Rect {
                x: center.x - width / 2.0,
                y: center.y - height / 2.0,
                width,
                height,
            });
        }
    }

    tracing::debug!(shapes = drawing.shapes.len(), omitted, "Assembled rectangles");
    Ok(drawing.translate(options.border, options.border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample::Bilinear;

    #[test]
    fn test_black_cells_fill_cell_minus_gap() {
        // Left half black, right half white: white cells shrink to the floor
        let buffer = SampleBuffer::from_fn(40, 20, |x, _| if x < 20 { 0.0 } else { 255.0 });
        let options = SquareOptions::new()
            .cells(Some(2), Some(1))
            .min_thick(4.0)
            .min_square_size(2.0)
            .border(0.0);
        let drawing = render(&buffer, &options, &Bilinear).unwrap();

        let rects: Vec<(f64, f64, f64, f64)> = drawing
            .shapes
            .iter()
            .map(|shape| match shape {
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                } => (*x, *y, *width, *height),
                other => panic!("expected rect, got {other:?}"),
            })
            .collect();
        let expected = [(2.0, 2.0, 16.0, 16.0), (29.0, 9.0, 2.0, 2.0)];
        assert_eq!(rects.len(), expected.len());
        for (got, want) in rects.iter().zip(expected) {
            assert!((got.0 - want.0).abs() < 1e-9, "{got:?} != {want:?}");
            assert!((got.1 - want.1).abs() < 1e-9, "{got:?} != {want:?}");
            assert!((got.2 - want.2).abs() < 1e-9, "{got:?} != {want:?}");
            assert!((got.3 - want.3).abs() < 1e-9, "{got:?} != {want:?}");
        }
    }

    #[test]
    fn test_rectangles_follow_cell_aspect() {
        let buffer = SampleBuffer::from_fn(40, 10, |x, y| ((x + y) % 2) as f32 * 255.0);
        let options = SquareOptions::new().cells(Some(2), Some(1)).border(0.0);
        let drawing = render(&buffer, &options, &Bilinear).unwrap();
        for shape in &drawing.shapes {
            let Shape::Rect { width, height, .. } = shape else {
                panic!("expected rect");
            };
            assert!(width > height);
        }
    }

    #[test]
    fn test_brighter_cells_never_grow() {
        // Six cells stepping from black toward white
        let buffer = SampleBuffer::from_fn(60, 10, |x, _| (x / 10 * 50) as f32);
        let options = SquareOptions::new()
            .cells(Some(6), Some(1))
            .min_thick(2.0)
            .min_square_size(1.0)
            .border(0.0);
        let drawing = render(&buffer, &options, &Bilinear).unwrap();
        assert_eq!(drawing.shapes.len(), 6);

        let widths: Vec<f64> = drawing
            .shapes
            .iter()
            .map(|shape| match shape {
                Shape::Rect { width, .. } => *width,
                other => panic!("expected rect, got {other:?}"),
            })
            .collect();
        for pair in widths.windows(2) {
            assert!(pair[0] > pair[1], "widths not decreasing: {widths:?}");
        }
        assert!((widths[0] - 8.0).abs() < 1e-9);
        assert!((widths[5] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_rectangles_are_omitted() {
        let buffer = SampleBuffer::from_fn(20, 20, |x, _| if x < 10 { 0.0 } else { 255.0 });
        let options = SquareOptions::new()
            .cells(Some(2), Some(2))
            .min_thick(1.0)
            .min_square_size(0.0)
            .border(3.0);
        let drawing = render(&buffer, &options, &Bilinear).unwrap();
        assert_eq!(drawing.shapes.len(), 2);
        assert!(drawing.bounds_check());
        assert_eq!(drawing.width, 26.0);
    }

    #[test]
    fn test_missing_counts_fail_before_pixel_work() {
        let buffer = SampleBuffer::filled(10, 10, 0.0);
        let options = SquareOptions::new().cells(None, None);
        assert_eq!(
            render(&buffer, &options, &Bilinear).unwrap_err(),
            HalftoneError::MissingCellCount
        );
    }
}
