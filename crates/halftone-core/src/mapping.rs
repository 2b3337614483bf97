//! Affine value mapping.
//!
//! Every place where brightness turns into geometry goes through
//! [`ValueMap`]. The map is not clamped: inputs outside the source range
//! extrapolate linearly, so callers clamp brightness first when they need
//! strict bounds.

use crate::error::HalftoneError;

/// Affine map sending `in_min -> out_min` and `in_max -> out_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMap {
    slope: f64,
    in_max: f64,
    out_max: f64,
}

impl ValueMap {
    /// Fails with [`HalftoneError::DegenerateRange`] when `in_min == in_max`.
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<Self, HalftoneError> {
        if in_min == in_max {
            return Err(HalftoneError::DegenerateRange { value: in_min });
        }
        Ok(Self {
            slope: (out_max - out_min) / (in_max - in_min),
            in_max,
            out_max,
        })
    }

    /// Map from the brightness domain: `0 -> at_black`, `255 -> at_white`.
    pub fn from_brightness(at_black: f64, at_white: f64) -> Self {
        Self {
            slope: (at_white - at_black) / 255.0,
            in_max: 255.0,
            out_max: at_white,
        }
    }

    /// Evaluated relative to `in_max`, so `apply(in_max)` is exactly `out_max`.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        self.slope * (x - self.in_max) + self.out_max
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

/// One-shot form of [`ValueMap::apply`].
pub fn map_value(
    x: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
) -> Result<f64, HalftoneError> {
    Ok(ValueMap::new(in_min, in_max, out_min, out_max)?.apply(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_map_to_endpoints() {
        let ranges = [
            (0.0, 255.0, 3.0, 12.5),
            (255.0, 0.0, 40.0, 50.0),
            (-1.0, 1.0, 100.0, -100.0),
            (10.0, 11.0, 0.0, 0.0),
        ];
        for (in_min, in_max, out_min, out_max) in ranges {
            let map = ValueMap::new(in_min, in_max, out_min, out_max).unwrap();
            assert!((map.apply(in_min) - out_min).abs() < 1e-9);
            assert_eq!(map.apply(in_max), out_max);
        }
    }

    #[test]
    fn test_midpoint_is_linear() {
        let y = map_value(127.5, 0.0, 255.0, 10.0, 20.0).unwrap();
        assert!((y - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_extrapolates_outside_range() {
        let y = map_value(510.0, 0.0, 255.0, 0.0, 1.0).unwrap();
        assert!((y - 2.0).abs() < 1e-12);
        let y = map_value(-255.0, 0.0, 255.0, 0.0, 1.0).unwrap();
        assert!((y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_brightness_matches_new() {
        let a = ValueMap::from_brightness(12.0, 3.0);
        let b = ValueMap::new(0.0, 255.0, 12.0, 3.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_range_is_rejected() {
        let err = ValueMap::new(5.0, 5.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err, HalftoneError::DegenerateRange { value: 5.0 });
    }
}
