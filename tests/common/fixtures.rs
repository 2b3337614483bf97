//! Synthetic test images.

use image::{GrayImage, Luma};

/// Uniform mid-gray square.
pub fn mid_gray(size: u32) -> GrayImage {
    GrayImage::from_pixel(size, size, Luma([128]))
}

/// Black diagonal on white.
pub fn diagonal(size: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| if x == y { Luma([0]) } else { Luma([255]) })
}

/// Dark on the left, bright on the right.
pub fn horizontal_ramp(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        Luma([(x * 255 / (width - 1).max(1)) as u8])
    })
}

/// Dark at the top, bright at the bottom.
pub fn vertical_ramp(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |_, y| {
        Luma([(y * 255 / (height - 1).max(1)) as u8])
    })
}

/// Vertical stripes of equal width, one per level.
pub fn steps(width: u32, height: u32, levels: &[u8]) -> GrayImage {
    let stripe = width / levels.len() as u32;
    GrayImage::from_fn(width, height, |x, _| {
        let index = ((x / stripe) as usize).min(levels.len() - 1);
        Luma([levels[index]])
    })
}

/// Deterministic texture with structure on both axes.
pub fn texture(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x * 37 + y * 91 + x * y) % 256) as u8]))
}

/// Preset exercising every section.
pub const PRESET_YAML: &str = r#"
bands:
  n_bands: 8
  border: 4
squares:
  cells_h: 6
  border: 0
tiles:
  cells_h: 5
  tile_type: squares
vasarely:
  n_bands: 5
  restore_size: false
"#;
