//! Parallel deformed bands.
//!
//! The image is cut into `n_bands` slots. Every resized row contributes one
//! point to each edge of each band, so a band is a polygon whose local width
//! follows the darkness of that row inside the slot.

use crate::aggregate::band_means;
use crate::buffer::SampleBuffer;
use crate::contrast::normalize;
use crate::error::HalftoneError;
use crate::geometry::{band_polygon, Drawing};
use crate::grid::BandGrid;
use crate::options::{Axis, BandOptions};
use crate::params::BandEdges;
use crate::resample::Resample;

/// Render `buffer` as a band drawing.
///
/// Horizontal bands are vertical bands of the transposed image, transposed
/// back once the drawing is assembled.
pub fn render(
    buffer: &SampleBuffer,
    options: &BandOptions,
    resampler: &dyn Resample,
) -> Result<Drawing, HalftoneError> {
    options.validate()?;
    match options.axis {
        Axis::Vertical => render_canonical(buffer, options, resampler),
        Axis::Horizontal => {
            Ok(render_canonical(&buffer.transpose(), options, resampler)?.transposed())
        }
    }
}

fn render_canonical(
    buffer: &SampleBuffer,
    options: &BandOptions,
    resampler: &dyn Resample,
) -> Result<Drawing, HalftoneError> {
    let grid = BandGrid::new(
        buffer.width(),
        buffer.height(),
        options.n_bands,
        options.resolution,
    )?;
    let slot = grid.slot_width();
    // Edges relative to the slot start; every slot shares them
    let edges = BandEdges::new(0.0, slot, options.min_thick, options.min_space)?;

    tracing::debug!(
        n_bands = grid.n_bands,
        band_width = grid.band_width,
        resolution = grid.resolution,
        slot_width = slot,
        "Partitioned bands"
    );

    let normalized = normalize(buffer, options.invert);
    let resized = resampler.resize(&normalized.buffer, grid.width_out, grid.resolution);
    let means = band_means(&resized, grid.n_bands, grid.band_width)?;

    let ys: Vec<f64> = (0..grid.resolution).map(|row| grid.row_y(row)).collect();
    let mut drawing = Drawing::new(
        grid.width_in as f64,
        grid.height_in as f64,
        options.border,
        options.border,
    );

    for band in 0..grid.n_bands {
        let start = band as f64 * slot;
        let values = means.column(band);
        let lefts: Vec<f64> = values.iter().map(|&v| start + edges.left(v)).collect();
        let rights: Vec<f64> = values.iter().map(|&v| start + edges.right(v)).collect();
        drawing.push(band_polygon(&lefts, &rights, &ys));
    }

    tracing::debug!(shapes = drawing.shapes.len(), "Assembled band polygons");
    Ok(drawing.translate(options.border, options.border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Shape};
    use crate::resample::Bilinear;

    fn gradient(width: usize, height: usize) -> SampleBuffer {
        SampleBuffer::from_fn(width, height, |x, _| (x * 255 / (width - 1)) as f32)
    }

    fn polygon_points(shape: &Shape) -> &[Point] {
        match shape {
            Shape::Polygon { points } => points,
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_one_polygon_per_band() {
        let options = BandOptions::new().n_bands(5).resolution(Some(12));
        let drawing = render(&gradient(50, 40), &options, &Bilinear).unwrap();
        assert_eq!(drawing.shapes.len(), 5);
        for shape in &drawing.shapes {
            assert_eq!(polygon_points(shape).len(), 24);
        }
    }

    #[test]
    fn test_canvas_includes_border() {
        let options = BandOptions::new().n_bands(4).border(7.0);
        let drawing = render(&gradient(40, 30), &options, &Bilinear).unwrap();
        assert_eq!(drawing.width, 54.0);
        assert_eq!(drawing.height, 44.0);
        assert!(drawing.frame.is_some());
        assert!(drawing.bounds_check());
    }

    #[test]
    fn test_darker_slots_produce_wider_bands() {
        // Brightness rises left to right, so band width must fall
        let options = BandOptions::new()
            .n_bands(4)
            .border(0.0)
            .min_thick(1.0)
            .min_space(1.0)
            .resolution(Some(4));
        let drawing = render(&gradient(80, 20), &options, &Bilinear).unwrap();
        let widths: Vec<f64> = drawing
            .shapes
            .iter()
            .map(|shape| {
                let points = polygon_points(shape);
                let n = points.len();
                points[n - 1].x - points[0].x
            })
            .collect();
        for pair in widths.windows(2) {
            assert!(pair[0] > pair[1], "widths not decreasing: {widths:?}");
        }
    }

    #[test]
    fn test_bands_repeat_with_slot_offset() {
        let options = BandOptions::new().n_bands(3).border(0.0).resolution(Some(5));
        let buffer = SampleBuffer::from_fn(60, 20, |_, y| (y * 12) as f32);
        let drawing = render(&buffer, &options, &Bilinear).unwrap();

        let first = polygon_points(&drawing.shapes[0]);
        for (band, shape) in drawing.shapes.iter().enumerate() {
            let dx = band as f64 * 20.0;
            for (p, q) in polygon_points(shape).iter().zip(first) {
                assert!((p.x - (q.x + dx)).abs() < 1e-9, "band {band}: {p:?} vs {q:?}");
                assert_eq!(p.y, q.y);
            }
        }
    }

    #[test]
    fn test_floors_larger_than_slot_are_rejected() {
        let options = BandOptions::new().n_bands(10).min_thick(4.0).min_space(4.0);
        let err = render(&gradient(50, 50), &options, &Bilinear).unwrap_err();
        assert!(matches!(err, HalftoneError::InvalidOption { name: "min_thick", .. }));
    }

    #[test]
    fn test_horizontal_swaps_canvas() {
        let options = BandOptions::new().n_bands(4).axis(Axis::Horizontal).border(0.0);
        let drawing = render(&gradient(60, 20), &options, &Bilinear).unwrap();
        assert_eq!((drawing.width, drawing.height), (60.0, 20.0));
        assert!(drawing.bounds_check());
        // Bands are stacked along y: each polygon spans the full width
        let points = polygon_points(&drawing.shapes[0]);
        assert!(points.iter().all(|p| p.y <= 5.0 + 1e-9));
    }
}
