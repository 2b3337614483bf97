//! Grid partitioning.
//!
//! Every mode resizes its input so the partitioned axis is an exact multiple
//! of the cell count: `cell = round(dim / n)`, `dim_out = cell * n`. No
//! partial cells exist after the resize. The scale factors induced by that
//! resize are what carries cell geometry back into original image space.
//!
//! # Rounding
//!
//! All rounding here is round-half-to-even ([`round_half_even`]), applied the
//! same way on both axes.

use crate::error::HalftoneError;

/// Round to the nearest integer, ties to even.
#[inline]
pub fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

fn rounded_count(x: f64) -> usize {
    round_half_even(x).max(0.0) as usize
}

fn check_dimensions(width_in: usize, height_in: usize) -> Result<(), HalftoneError> {
    if width_in == 0 || height_in == 0 {
        return Err(HalftoneError::invalid_grid(format!(
            "image is empty ({width_in}x{height_in})"
        )));
    }
    Ok(())
}

/// Split `dim` into `n` equal cells, returning the integer cell size.
fn cell_size(dim: usize, n: usize, axis: &str) -> Result<usize, HalftoneError> {
    if n == 0 {
        return Err(HalftoneError::invalid_grid(format!(
            "{axis} cell count must be at least 1"
        )));
    }
    let size = rounded_count(dim as f64 / n as f64);
    if size == 0 {
        return Err(HalftoneError::invalid_grid(format!(
            "{n} {axis} cells do not fit in {dim} px (cell size would be 0)"
        )));
    }
    Ok(size)
}

/// Two-axis cell grid used by the tile and square modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub width_in: usize,
    pub height_in: usize,
    pub cells_h: usize,
    pub cells_v: usize,
    /// Cell width in resized pixels.
    pub cell_width: usize,
    /// Cell height in resized pixels.
    pub cell_height: usize,
    pub width_out: usize,
    pub height_out: usize,
}

impl GridSpec {
    /// Lay a grid over a `width_in x height_in` image.
    ///
    /// At least one count is required. A missing count is derived so cells
    /// stay roughly square: `cells_v = round(cells_h * height / width)`.
    pub fn new(
        width_in: usize,
        height_in: usize,
        cells_h: Option<usize>,
        cells_v: Option<usize>,
    ) -> Result<Self, HalftoneError> {
        check_dimensions(width_in, height_in)?;

        let (cells_h, cells_v) = match (cells_h, cells_v) {
            (None, None) => return Err(HalftoneError::MissingCellCount),
            (Some(h), Some(v)) => (h, v),
            (Some(h), None) => (
                h,
                rounded_count(h as f64 * height_in as f64 / width_in as f64),
            ),
            (None, Some(v)) => (
                rounded_count(v as f64 * width_in as f64 / height_in as f64),
                v,
            ),
        };

        let cell_width = cell_size(width_in, cells_h, "horizontal")?;
        let cell_height = cell_size(height_in, cells_v, "vertical")?;

        Ok(Self {
            width_in,
            height_in,
            cells_h,
            cells_v,
            cell_width,
            cell_height,
            width_out: cell_width * cells_h,
            height_out: cell_height * cells_v,
        })
    }

    /// `width_out / width_in`
    #[inline]
    pub fn scale_h(&self) -> f64 {
        self.width_out as f64 / self.width_in as f64
    }

    /// `height_out / height_in`
    #[inline]
    pub fn scale_v(&self) -> f64 {
        self.height_out as f64 / self.height_in as f64
    }

    /// Cell width in original image space.
    #[inline]
    pub fn extent_h(&self) -> f64 {
        self.width_in as f64 / self.cells_h as f64
    }

    /// Cell height in original image space.
    #[inline]
    pub fn extent_v(&self) -> f64 {
        self.height_in as f64 / self.cells_v as f64
    }
}

/// One-axis partition used by band mode.
///
/// Columns are split into `n_bands` equal slots; rows are resampled to
/// `resolution` independently of the slot width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandGrid {
    pub width_in: usize,
    pub height_in: usize,
    pub n_bands: usize,
    /// Slot width in resized pixels.
    pub band_width: usize,
    pub width_out: usize,
    /// Number of rows after resizing, one contour point per row and edge.
    pub resolution: usize,
}

impl BandGrid {
    /// Without an explicit `resolution` the row count preserves the aspect
    /// ratio of the resized width.
    pub fn new(
        width_in: usize,
        height_in: usize,
        n_bands: usize,
        resolution: Option<usize>,
    ) -> Result<Self, HalftoneError> {
        check_dimensions(width_in, height_in)?;
        let band_width = cell_size(width_in, n_bands, "band")?;
        let width_out = band_width * n_bands;

        let resolution = match resolution {
            Some(0) => {
                return Err(HalftoneError::invalid_grid("band resolution must be at least 1"))
            }
            Some(r) => r,
            None => rounded_count(height_in as f64 * width_out as f64 / width_in as f64).max(1),
        };

        Ok(Self {
            width_in,
            height_in,
            n_bands,
            band_width,
            width_out,
            resolution,
        })
    }

    #[inline]
    pub fn scale_h(&self) -> f64 {
        self.width_out as f64 / self.width_in as f64
    }

    #[inline]
    pub fn scale_v(&self) -> f64 {
        self.resolution as f64 / self.height_in as f64
    }

    /// Slot width in original image space.
    #[inline]
    pub fn slot_width(&self) -> f64 {
        self.width_in as f64 / self.n_bands as f64
    }

    /// Original-space y coordinate of resized row `row`.
    #[inline]
    pub fn row_y(&self, row: usize) -> f64 {
        row as f64 * self.height_in as f64 / self.resolution as f64
    }
}

/// Partition for the Vasarely threshold pattern.
///
/// Each band spans a period of `2 * half_band` resized pixels so the
/// threshold curve is symmetric around the band center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VasarelyGrid {
    pub width_in: usize,
    pub height_in: usize,
    pub n_bands: usize,
    pub half_band: usize,
    pub width_out: usize,
    pub height_out: usize,
}

impl VasarelyGrid {
    pub fn new(width_in: usize, height_in: usize, n_bands: usize) -> Result<Self, HalftoneError> {
        check_dimensions(width_in, height_in)?;
        let half_bands = n_bands.checked_mul(2).ok_or_else(|| {
            HalftoneError::invalid_grid(format!("{n_bands} bands do not fit in {width_in} px"))
        })?;
        let half_band = cell_size(width_in, half_bands, "half band")?;
        let width_out = 2 * half_band * n_bands;
        let height_out = if width_out == width_in {
            height_in
        } else {
            rounded_count(height_in as f64 * width_out as f64 / width_in as f64).max(1)
        };
        Ok(Self {
            width_in,
            height_in,
            n_bands,
            half_band,
            width_out,
            height_out,
        })
    }

    #[inline]
    pub fn period(&self) -> usize {
        2 * self.half_band
    }

    /// True when the input already has the partitioned size.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.width_out == self.width_in && self.height_out == self.height_in
    }
}
