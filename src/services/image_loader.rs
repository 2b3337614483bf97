use std::path::Path;

use halftone_core::SampleBuffer;
use image::{GrayImage, ImageReader};

use crate::error::RenderError;

/// Decode an image file into 8-bit luma.
///
/// The format is sniffed from the file content, so a misnamed extension
/// still loads.
pub fn load_luma(path: &Path) -> Result<GrayImage, RenderError> {
    let img = ImageReader::open(path)
        .map_err(|e| RenderError::image_load(path, e))?
        .with_guessed_format()
        .map_err(|e| RenderError::image_load(path, e))?
        .decode()
        .map_err(|e| RenderError::image_load(path, e))?
        .into_luma8();

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Decoded image"
    );
    Ok(img)
}

/// Decode an image file straight into a sample buffer.
pub fn load_samples(path: &Path) -> Result<SampleBuffer, RenderError> {
    let img = load_luma(path)?;
    to_samples(&img)
}

pub fn to_samples(img: &GrayImage) -> Result<SampleBuffer, RenderError> {
    Ok(SampleBuffer::from_luma8(
        img.width() as usize,
        img.height() as usize,
        img.as_raw(),
    )?)
}
