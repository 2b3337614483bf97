//! Shape parameterization: brightness to geometry.
//!
//! Each cell's mean brightness `v` in `[0, 255]` becomes a geometric
//! parameter through a [`ValueMap`]. The common law of every mode is that
//! darker cells produce larger dark shapes: brightness 0 spreads a shape to
//! its floor on the bright side, brightness 255 shrinks it to its own floor.

use crate::error::HalftoneError;
use crate::mapping::ValueMap;

/// Darkest brightness.
pub const BLACK: f64 = 0.0;
/// Brightest brightness.
pub const WHITE: f64 = 255.0;

/// Clamp a brightness into `[0, 255]` before it is mapped.
#[inline]
pub fn clamp_brightness(v: f64) -> f64 {
    v.clamp(BLACK, WHITE)
}

/// Edge positions of one band inside its slot.
///
/// The left edge moves from `start + min_thick/2` (black) to
/// `mid - min_space/2` (white); the right edge mirrors it around the slot
/// center. The band between the edges is the dark shape.
#[derive(Debug, Clone, Copy)]
pub struct BandEdges {
    left: ValueMap,
    right: ValueMap,
}

impl BandEdges {
    /// `slot_width` is in output coordinates. Fails when the floors do not
    /// fit in the slot.
    pub fn new(
        slot_start: f64,
        slot_width: f64,
        min_thick: f64,
        min_space: f64,
    ) -> Result<Self, HalftoneError> {
        if min_thick + min_space > slot_width {
            return Err(HalftoneError::invalid_option(
                "min_thick",
                format!(
                    "min_thick ({min_thick}) + min_space ({min_space}) exceed the band slot of {slot_width:.3} px"
                ),
            ));
        }
        let mid = slot_start + slot_width / 2.0;
        let end = slot_start + slot_width;
        Ok(Self {
            left: ValueMap::from_brightness(slot_start + min_thick / 2.0, mid - min_space / 2.0),
            right: ValueMap::from_brightness(end - min_thick / 2.0, mid + min_space / 2.0),
        })
    }

    #[inline]
    pub fn left(&self, v: f64) -> f64 {
        self.left.apply(clamp_brightness(v))
    }

    #[inline]
    pub fn right(&self, v: f64) -> f64 {
        self.right.apply(clamp_brightness(v))
    }

    /// Width of the dark band at brightness `v`.
    #[inline]
    pub fn width(&self, v: f64) -> f64 {
        self.right(v) - self.left(v)
    }
}

/// Size of a tile or rectangle along one axis.
///
/// `cell_extent - min_thick` at black, `min_size` at white, clamped to zero
/// when the floors exceed the cell.
pub fn tile_extent(v: f64, cell_extent: f64, min_thick: f64, min_size: f64) -> f64 {
    ValueMap::from_brightness(cell_extent - min_thick, min_size)
        .apply(clamp_brightness(v))
        .max(0.0)
}

/// Half of a Vasarely floor in pixels: `ceil(floor / 2) - 1`, never negative.
#[inline]
pub fn half_floor(floor: u32) -> usize {
    (floor as usize).div_ceil(2).saturating_sub(1)
}

fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    (0..num).map(move |i| {
        if num == 1 {
            start
        } else {
            start + (stop - start) * i as f64 / (num - 1) as f64
        }
    })
}

/// Threshold curve over one band period of `2 * half_band` pixels.
///
/// Flat at 1 over the space floor, ramps down to 0, stays at 0 across the
/// band floor, then ramps back up. A pixel is bright when its normalized
/// brightness exceeds the curve.
pub fn threshold_pattern(
    half_band: usize,
    min_space: u32,
    min_band: u32,
) -> Result<Vec<f64>, HalftoneError> {
    let space = half_floor(min_space);
    let band = half_floor(min_band);
    if space + band > half_band {
        return Err(HalftoneError::InvalidPattern {
            floors: (space + band) as u32,
            half_band: half_band as u32,
        });
    }
    let ramp = half_band - space - band;

    let pattern: Vec<f64> = std::iter::repeat(1.0)
        .take(space)
        .chain(linspace(1.0, 0.0, ramp))
        .chain(std::iter::repeat(0.0).take(2 * band))
        .chain(linspace(0.0, 1.0, ramp))
        .chain(std::iter::repeat(1.0).take(space))
        .collect();
    debug_assert_eq!(pattern.len(), 2 * half_band);
    Ok(pattern)
}
