//! Per-cell brightness aggregation.
//!
//! Reduces a resized buffer to one mean brightness per cell. The buffer must
//! already be an exact multiple of the cell size; the grid partitioner
//! guarantees that.

use crate::buffer::SampleBuffer;
use crate::error::HalftoneError;
use crate::grid::GridSpec;

/// Mean brightness per cell, shape `[rows, cols]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CellValues {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl CellValues {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn check_size(buffer: &SampleBuffer, width: usize, height: usize) -> Result<(), HalftoneError> {
    if buffer.width() != width || buffer.height() != height {
        return Err(HalftoneError::BufferSizeMismatch {
            expected: width * height,
            actual: buffer.data().len(),
        });
    }
    Ok(())
}

/// Block means over a two-axis grid, shape `[cells_v, cells_h]`.
pub fn cell_means(buffer: &SampleBuffer, grid: &GridSpec) -> Result<CellValues, HalftoneError> {
    if grid.cell_width == 0 || grid.cell_height == 0 {
        return Err(HalftoneError::invalid_grid("cell size is 0"));
    }
    check_size(buffer, grid.width_out, grid.height_out)?;

    let mut sums = vec![0.0f64; grid.cells_v * grid.cells_h];
    for y in 0..grid.height_out {
        let row = buffer.row(y);
        let base = (y / grid.cell_height) * grid.cells_h;
        for (col, chunk) in row.chunks_exact(grid.cell_width).enumerate() {
            sums[base + col] += chunk.iter().map(|&v| v as f64).sum::<f64>();
        }
    }

    let count = (grid.cell_width * grid.cell_height) as f64;
    Ok(CellValues {
        rows: grid.cells_v,
        cols: grid.cells_h,
        values: sums.into_iter().map(|s| s / count).collect(),
    })
}

/// Per-row means over runs of `cell_width` pixels, shape `[height, n_cells]`.
///
/// This is the cross-section used by the band modes: each row keeps its own
/// value so band thickness can vary along the band.
pub fn band_means(
    buffer: &SampleBuffer,
    n_cells: usize,
    cell_width: usize,
) -> Result<CellValues, HalftoneError> {
    if n_cells == 0 || cell_width == 0 {
        return Err(HalftoneError::invalid_grid("band width is 0"));
    }
    check_size(buffer, n_cells * cell_width, buffer.height())?;

    let mut values = Vec::with_capacity(buffer.height() * n_cells);
    for y in 0..buffer.height() {
        for chunk in buffer.row(y).chunks_exact(cell_width) {
            let sum: f64 = chunk.iter().map(|&v| v as f64).sum();
            values.push(sum / cell_width as f64);
        }
    }

    Ok(CellValues {
        rows: buffer.height(),
        cols: n_cells,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_means_blocks() {
        // 4x2 image, 2x1 cells of 2x2 pixels
        let buffer = SampleBuffer::new(4, 2, vec![0.0, 2.0, 10.0, 10.0, 4.0, 6.0, 20.0, 40.0])
            .unwrap();
        let grid = GridSpec::new(4, 2, Some(2), Some(1)).unwrap();
        let cells = cell_means(&buffer, &grid).unwrap();
        assert_eq!(cells.rows(), 1);
        assert_eq!(cells.cols(), 2);
        assert_eq!(cells.values(), &[3.0, 20.0]);
    }

    #[test]
    fn test_cell_means_shape() {
        let buffer = SampleBuffer::from_fn(30, 20, |x, y| ((x / 10) + 10 * (y / 10)) as f32);
        let grid = GridSpec::new(30, 20, Some(3), Some(2)).unwrap();
        let cells = cell_means(&buffer, &grid).unwrap();
        assert_eq!(cells.rows(), 2);
        assert_eq!(cells.cols(), 3);
        assert_eq!(cells.get(1, 2), 12.0);
        assert_eq!(cells.get(0, 1), 1.0);
    }

    #[test]
    fn test_cell_means_rejects_wrong_size() {
        let buffer = SampleBuffer::filled(31, 20, 0.0);
        let grid = GridSpec::new(30, 20, Some(3), Some(2)).unwrap();
        assert!(matches!(
            cell_means(&buffer, &grid),
            Err(HalftoneError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_band_means_per_row() {
        let buffer = SampleBuffer::new(4, 2, vec![0.0, 10.0, 100.0, 200.0, 1.0, 1.0, 2.0, 4.0])
            .unwrap();
        let values = band_means(&buffer, 2, 2).unwrap();
        assert_eq!(values.rows(), 2);
        assert_eq!(values.column(0), vec![5.0, 1.0]);
        assert_eq!(values.column(1), vec![150.0, 3.0]);
    }

    #[test]
    fn test_band_means_zero_width_is_invalid_grid() {
        let buffer = SampleBuffer::filled(4, 2, 0.0);
        assert!(matches!(
            band_means(&buffer, 2, 0),
            Err(HalftoneError::InvalidGrid { .. })
        ));
    }
}
