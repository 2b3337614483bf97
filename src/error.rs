use std::path::PathBuf;

use halftone_core::HalftoneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to load image {path}: {message}")]
    ImageLoad { path: PathBuf, message: String },

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Halftone error: {0}")]
    Halftone(#[from] HalftoneError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub(crate) fn image_load(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        RenderError::ImageLoad {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
