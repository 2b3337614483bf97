//! Contour and geometry assembly.
//!
//! Shapes are computed in canonical space (vertical bands, original image
//! coordinates). Two declared steps then move them into output space:
//! [`Drawing::translate`] adds the border margin and
//! [`Drawing::transposed`] swaps the axes for horizontal layouts.

use crate::sink::{DrawingSink, Style};

/// A point in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    #[inline]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One halftone primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Closed simple polygon (band outline).
    Polygon { points: Vec<Point> },
    /// Rectangle from its top-left corner.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Ellipse from its center; circles use equal radii on square cells.
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
}

impl Shape {
    /// `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Polygon { points } => points.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
            ),
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => (*x, *y, x + width, y + height),
            Shape::Ellipse { cx, cy, rx, ry } => (cx - rx, cy - ry, cx + rx, cy + ry),
        }
    }

    fn transposed(&self) -> Self {
        match self {
            Shape::Polygon { points } => Shape::Polygon {
                points: points.iter().map(|p| p.transposed()).collect(),
            },
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => Shape::Rect {
                x: *y,
                y: *x,
                width: *height,
                height: *width,
            },
            Shape::Ellipse { cx, cy, rx, ry } => Shape::Ellipse {
                cx: *cy,
                cy: *cx,
                rx: *ry,
                ry: *rx,
            },
        }
    }

    fn translated(&self, dx: f64, dy: f64) -> Self {
        match self {
            Shape::Polygon { points } => Shape::Polygon {
                points: points.iter().map(|p| p.translated(dx, dy)).collect(),
            },
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => Shape::Rect {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
            },
            Shape::Ellipse { cx, cy, rx, ry } => Shape::Ellipse {
                cx: cx + dx,
                cy: cy + dy,
                rx: *rx,
                ry: *ry,
            },
        }
    }
}

/// Outline around the whole drawing, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Corners in drawing order: top-left, bottom-left, bottom-right, top-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, self.height),
            Point::new(self.width, self.height),
            Point::new(self.width, 0.0),
        ]
    }
}

/// Finished vector drawing in output coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Canvas width: image width plus both horizontal borders.
    pub width: f64,
    /// Canvas height: image height plus both vertical borders.
    pub height: f64,
    /// Shapes in drawing order.
    pub shapes: Vec<Shape>,
    /// Present only when the border is non-zero.
    pub frame: Option<Frame>,
}

impl Drawing {
    /// Canvas for a `width_in x height_in` image with the given borders.
    /// The frame is attached only when a border exists.
    pub fn new(width_in: f64, height_in: f64, border_h: f64, border_v: f64) -> Self {
        let width = width_in + 2.0 * border_h;
        let height = height_in + 2.0 * border_v;
        let frame = (border_h > 0.0 || border_v > 0.0).then_some(Frame { width, height });
        Self {
            width,
            height,
            shapes: Vec::new(),
            frame,
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Shift every shape by `(dx, dy)`. The canvas and frame stay put.
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.shapes = self.shapes.iter().map(|s| s.translated(dx, dy)).collect();
        self
    }

    /// Swap x and y everywhere, including canvas and frame size.
    pub fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            shapes: self.shapes.iter().map(Shape::transposed).collect(),
            frame: self.frame.map(|f| Frame {
                width: f.height,
                height: f.width,
            }),
        }
    }

    /// True when every shape lies inside `[0, width] x [0, height]`.
    pub fn bounds_check(&self) -> bool {
        const EPS: f64 = 1e-9;
        self.shapes.iter().all(|shape| {
            let (x0, y0, x1, y1) = shape.bounds();
            x0 >= -EPS && y0 >= -EPS && x1 <= self.width + EPS && y1 <= self.height + EPS
        })
    }

    /// Replay the shapes, then the frame, into `sink`.
    pub fn draw_into<S: DrawingSink + ?Sized>(&self, sink: &mut S) {
        let fill = Style::filled_black();
        for shape in &self.shapes {
            match shape {
                Shape::Polygon { points } => sink.add_polygon(points, &fill),
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                } => sink.add_rect(Point::new(*x, *y), (*width, *height), &fill),
                Shape::Ellipse { cx, cy, rx, ry } => {
                    sink.add_ellipse(Point::new(*cx, *cy), (*rx, *ry), &fill)
                }
            }
        }
        if let Some(frame) = self.frame {
            sink.add_polygon(&frame.corners(), &Style::frame());
        }
    }
}

/// Closed band outline: left edge top to bottom, then right edge bottom to top.
///
/// `lefts`, `rights` and `ys` hold one entry per row. As long as every left
/// edge is at or left of its right edge the result is a simple polygon with
/// `2 * ys.len()` points.
pub fn band_polygon(lefts: &[f64], rights: &[f64], ys: &[f64]) -> Shape {
    debug_assert_eq!(lefts.len(), ys.len());
    debug_assert_eq!(rights.len(), ys.len());

    let down = lefts.iter().zip(ys).map(|(&x, &y)| Point::new(x, y));
    let up = rights
        .iter()
        .zip(ys)
        .rev()
        .map(|(&x, &y)| Point::new(x, y));
    Shape::Polygon {
        points: down.chain(up).collect(),
    }
}
