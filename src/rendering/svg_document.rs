use halftone_core::{Drawing, DrawingSink, Point, Style};
use svg::node::element::{Ellipse, Polygon, Rectangle};
use svg::{Document, Node};

/// SVG serialization of a halftone drawing.
///
/// Implements [`DrawingSink`], so a [`Drawing`] can be replayed straight into
/// it. The canvas uses the drawing's own units: `viewBox`, `width` and
/// `height` all match `drawing.width x drawing.height`.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    document: Document,
    width: f64,
    height: f64,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        let document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height);
        Self {
            document,
            width,
            height,
        }
    }

    pub fn from_drawing(drawing: &Drawing) -> Self {
        let mut document = Self::new(drawing.width, drawing.height);
        drawing.draw_into(&mut document);
        document
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Serialized SVG markup.
    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }
}

fn styled<T: Node>(mut node: T, style: &Style) -> T {
    node.assign("fill", style.fill.as_deref().unwrap_or("none"));
    if let Some(stroke) = &style.stroke {
        node.assign("stroke", stroke.as_str());
        node.assign("stroke-width", 1);
    }
    node
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DrawingSink for SvgDocument {
    fn add_polygon(&mut self, points: &[Point], style: &Style) {
        let polygon = Polygon::new().set("points", points_attr(points));
        self.document.append(styled(polygon, style));
    }

    fn add_rect(&mut self, top_left: Point, size: (f64, f64), style: &Style) {
        let rect = Rectangle::new()
            .set("x", top_left.x)
            .set("y", top_left.y)
            .set("width", size.0)
            .set("height", size.1);
        self.document.append(styled(rect, style));
    }

    fn add_ellipse(&mut self, center: Point, radii: (f64, f64), style: &Style) {
        let ellipse = Ellipse::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("rx", radii.0)
            .set("ry", radii.1);
        self.document.append(styled(ellipse, style));
    }
}
