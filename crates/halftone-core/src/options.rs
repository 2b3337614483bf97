//! Per-mode options.
//!
//! Each mode takes one immutable options value. Fields are public so callers
//! can build them with struct update syntax, and builder methods are provided
//! for fluent configuration. Every mode calls `validate()` once on entry,
//! before any pixel work.
//!
//! # Units
//!
//! | Mode     | `min_thick` / floors        | `border`                  |
//! |----------|-----------------------------|---------------------------|
//! | bands    | pixels of the input image   | pixels                    |
//! | squares  | pixels of the input image   | pixels                    |
//! | tiles    | ratio of the cell extent    | ratio of the cell extent  |
//! | vasarely | pixels of the resized image | n/a                       |

use std::fmt;
use std::str::FromStr;

use crate::error::HalftoneError;

/// Direction of the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Bands run top to bottom, side by side.
    #[default]
    Vertical,
    /// Bands run left to right, stacked.
    Horizontal,
}

impl FromStr for Axis {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" | "v" | "1" => Ok(Axis::Vertical),
            "horizontal" | "h" | "0" => Ok(Axis::Horizontal),
            other => Err(HalftoneError::UnsupportedMode(format!("axis '{other}'"))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Vertical => write!(f, "vertical"),
            Axis::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Primitive used by the tile mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileShape {
    #[default]
    Circle,
    Square,
}

impl FromStr for TileShape {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" | "circles" => Ok(TileShape::Circle),
            "square" | "squares" => Ok(TileShape::Square),
            other => Err(HalftoneError::UnsupportedMode(format!("tile type '{other}'"))),
        }
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileShape::Circle => write!(f, "circle"),
            TileShape::Square => write!(f, "square"),
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), HalftoneError> {
    if !value.is_finite() || value < 0.0 {
        return Err(HalftoneError::invalid_option(
            name,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}

fn positive_count(name: &'static str, value: usize) -> Result<(), HalftoneError> {
    if value == 0 {
        return Err(HalftoneError::invalid_option(name, "must be at least 1"));
    }
    Ok(())
}

fn cell_counts(cells_h: Option<usize>, cells_v: Option<usize>) -> Result<(), HalftoneError> {
    if cells_h.is_none() && cells_v.is_none() {
        return Err(HalftoneError::MissingCellCount);
    }
    if let Some(h) = cells_h {
        positive_count("cells_h", h)?;
    }
    if let Some(v) = cells_v {
        positive_count("cells_v", v)?;
    }
    Ok(())
}

/// Options for parallel deformed bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandOptions {
    /// Number of bands. Default 32.
    pub n_bands: usize,
    pub axis: Axis,
    /// Minimum bright gap between neighbouring bands, in pixels. Default 3.
    pub min_thick: f64,
    /// Minimum width of a dark band, in pixels. Default 3.
    pub min_space: f64,
    /// Margin around the bands, in pixels. Default 10.
    pub border: f64,
    /// Rows sampled along each band. `None` keeps the aspect ratio.
    pub resolution: Option<usize>,
    pub invert: bool,
}

impl Default for BandOptions {
    fn default() -> Self {
        Self {
            n_bands: 32,
            axis: Axis::Vertical,
            min_thick: 3.0,
            min_space: 3.0,
            border: 10.0,
            resolution: None,
            invert: false,
        }
    }
}

impl BandOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn n_bands(mut self, n: usize) -> Self {
        self.n_bands = n;
        self
    }

    #[inline]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    #[inline]
    pub fn min_thick(mut self, px: f64) -> Self {
        self.min_thick = px;
        self
    }

    #[inline]
    pub fn min_space(mut self, px: f64) -> Self {
        self.min_space = px;
        self
    }

    #[inline]
    pub fn border(mut self, px: f64) -> Self {
        self.border = px;
        self
    }

    #[inline]
    pub fn resolution(mut self, rows: Option<usize>) -> Self {
        self.resolution = rows;
        self
    }

    #[inline]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn validate(&self) -> Result<(), HalftoneError> {
        positive_count("n_bands", self.n_bands)?;
        non_negative("min_thick", self.min_thick)?;
        non_negative("min_space", self.min_space)?;
        non_negative("border", self.border)?;
        if let Some(r) = self.resolution {
            positive_count("resolution", r)?;
        }
        Ok(())
    }
}

/// Options for the rectangle grid (absolute pixel floors).
#[derive(Debug, Clone, PartialEq)]
pub struct SquareOptions {
    /// Default 32.
    pub cells_h: Option<usize>,
    pub cells_v: Option<usize>,
    /// Minimum bright gap between rectangles, in pixels. Default 3.
    pub min_thick: f64,
    /// Smallest rectangle side, in pixels. Default 3.
    pub min_square_size: f64,
    /// Margin, in pixels. Default 10.
    pub border: f64,
    pub invert: bool,
}

impl Default for SquareOptions {
    fn default() -> Self {
        Self {
            cells_h: Some(32),
            cells_v: None,
            min_thick: 3.0,
            min_square_size: 3.0,
            border: 10.0,
            invert: false,
        }
    }
}

impl SquareOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cells(mut self, cells_h: Option<usize>, cells_v: Option<usize>) -> Self {
        self.cells_h = cells_h;
        self.cells_v = cells_v;
        self
    }

    #[inline]
    pub fn min_thick(mut self, px: f64) -> Self {
        self.min_thick = px;
        self
    }

    #[inline]
    pub fn min_square_size(mut self, px: f64) -> Self {
        self.min_square_size = px;
        self
    }

    #[inline]
    pub fn border(mut self, px: f64) -> Self {
        self.border = px;
        self
    }

    #[inline]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn validate(&self) -> Result<(), HalftoneError> {
        cell_counts(self.cells_h, self.cells_v)?;
        non_negative("min_thick", self.min_thick)?;
        non_negative("min_square_size", self.min_square_size)?;
        non_negative("border", self.border)
    }
}

/// Options for the circle/square mosaic (floors as ratios of a cell).
#[derive(Debug, Clone, PartialEq)]
pub struct TileOptions {
    pub cells_h: Option<usize>,
    pub cells_v: Option<usize>,
    pub shape: TileShape,
    /// Minimum bright gap, as a ratio of the cell. Default 0.1.
    pub min_thick: f64,
    /// Smallest tile, as a ratio of the cell. Default 0.
    pub min_tile_size: f64,
    /// Margin, as a ratio of the cell. Default 1. Zero disables the frame.
    pub border: f64,
    pub invert: bool,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            cells_h: None,
            cells_v: None,
            shape: TileShape::Circle,
            min_thick: 0.1,
            min_tile_size: 0.0,
            border: 1.0,
            invert: false,
        }
    }
}

impl TileOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cells(mut self, cells_h: Option<usize>, cells_v: Option<usize>) -> Self {
        self.cells_h = cells_h;
        self.cells_v = cells_v;
        self
    }

    #[inline]
    pub fn shape(mut self, shape: TileShape) -> Self {
        self.shape = shape;
        self
    }

    #[inline]
    pub fn min_thick(mut self, ratio: f64) -> Self {
        self.min_thick = ratio;
        self
    }

    #[inline]
    pub fn min_tile_size(mut self, ratio: f64) -> Self {
        self.min_tile_size = ratio;
        self
    }

    #[inline]
    pub fn border(mut self, ratio: f64) -> Self {
        self.border = ratio;
        self
    }

    #[inline]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn validate(&self) -> Result<(), HalftoneError> {
        cell_counts(self.cells_h, self.cells_v)?;
        non_negative("min_thick", self.min_thick)?;
        non_negative("min_tile_size", self.min_tile_size)?;
        non_negative("border", self.border)?;
        if self.min_thick + self.min_tile_size > 1.0 {
            tracing::warn!(
                min_thick = self.min_thick,
                min_tile_size = self.min_tile_size,
                "min_thick + min_tile_size exceed one cell, dark tiles will shrink"
            );
        }
        Ok(())
    }
}

/// Options for the two-tone threshold pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct VasarelyOptions {
    /// Default 60.
    pub n_bands: usize,
    pub axis: Axis,
    /// Space floor in resized pixels. Default 4.
    pub min_space: u32,
    /// Band floor in resized pixels. Default 4.
    pub min_band: u32,
    /// Resample the pattern back to the input size. Default true.
    pub restore_size: bool,
    pub invert: bool,
}

impl Default for VasarelyOptions {
    fn default() -> Self {
        Self {
            n_bands: 60,
            axis: Axis::Vertical,
            min_space: 4,
            min_band: 4,
            restore_size: true,
            invert: false,
        }
    }
}

impl VasarelyOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn n_bands(mut self, n: usize) -> Self {
        self.n_bands = n;
        self
    }

    #[inline]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    #[inline]
    pub fn floors(mut self, min_space: u32, min_band: u32) -> Self {
        self.min_space = min_space;
        self.min_band = min_band;
        self
    }

    #[inline]
    pub fn restore_size(mut self, restore: bool) -> Self {
        self.restore_size = restore;
        self
    }

    #[inline]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn validate(&self) -> Result<(), HalftoneError> {
        positive_count("n_bands", self.n_bands)
    }
}
