pub mod svg_document;
pub mod svg_to_png;

pub use svg_document::SvgDocument;
pub use svg_to_png::{encode_gray_png, render_preview};
