//! The four halftone modes.
//!
//! Each mode is a pure function of an input buffer, its options and a
//! resampler. Vector modes return a [`Drawing`](crate::Drawing); the
//! threshold pattern mode returns a [`RasterImage`](crate::RasterImage).
//!
//! Pipeline shared by every mode:
//!
//! ```text
//! options.validate()        (fails before any pixel work)
//!     |
//! grid partition            (exact multiple of the cell count)
//!     |
//! contrast normalize        (optionally inverted, [0, 255])
//!     |
//! resample                  (to the partitioned size)
//!     |
//! aggregate                 (one mean per cell)
//!     |
//! parameterize + assemble   (canonical space, then border / transpose)
//! ```

pub mod bands;
pub mod squares;
pub mod tiles;
pub mod vasarely;

use crate::geometry::Point;

/// Center of cell `(row, col)` in original image space.
#[inline]
pub(crate) fn cell_center(row: usize, col: usize, extent_h: f64, extent_v: f64) -> Point {
    Point::new(
        (col as f64 + 0.5) * extent_h,
        (row as f64 + 0.5) * extent_v,
    )
}
