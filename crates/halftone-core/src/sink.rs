//! Drawing sink collaborator.
//!
//! The core never serializes anything. A finished [`Drawing`](crate::Drawing)
//! is replayed into a [`DrawingSink`], which owns the output format and the
//! save step.

use crate::geometry::Point;

/// Fill and stroke attributes of one primitive. `None` means "none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl Style {
    /// Solid black fill without outline, used by every halftone shape.
    pub fn filled_black() -> Self {
        Self {
            fill: Some("#000000".to_string()),
            stroke: None,
        }
    }

    /// Black outline without fill, used by the frame.
    pub fn frame() -> Self {
        Self {
            fill: None,
            stroke: Some("#000000".to_string()),
        }
    }
}

/// Receiver for vector primitives.
pub trait DrawingSink {
    /// Closed polygon through `points`.
    fn add_polygon(&mut self, points: &[Point], style: &Style);

    /// Axis-aligned rectangle from its top-left corner and size.
    fn add_rect(&mut self, top_left: Point, size: (f64, f64), style: &Style);

    /// Axis-aligned ellipse from its center and radii.
    fn add_ellipse(&mut self, center: Point, radii: (f64, f64), style: &Style);
}

/// A primitive recorded by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Polygon(Vec<Point>, Style),
    Rect(Point, (f64, f64), Style),
    Ellipse(Point, (f64, f64), Style),
}

/// Sink that keeps every call in order. Useful to inspect a drawing
/// without serializing it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<Recorded>,
}

impl DrawingSink for RecordingSink {
    fn add_polygon(&mut self, points: &[Point], style: &Style) {
        self.calls
            .push(Recorded::Polygon(points.to_vec(), style.clone()));
    }

    fn add_rect(&mut self, top_left: Point, size: (f64, f64), style: &Style) {
        self.calls.push(Recorded::Rect(top_left, size, style.clone()));
    }

    fn add_ellipse(&mut self, center: Point, radii: (f64, f64), style: &Style) {
        self.calls.push(Recorded::Ellipse(center, radii, style.clone()));
    }
}
