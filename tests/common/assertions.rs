//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Assert the file exists and holds an SVG document; returns its markup.
pub fn assert_svg_file(path: &Path) -> String {
    let markup = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Expected SVG at {}: {e}", path.display()));
    assert!(
        markup.contains("<svg") && markup.trim_end().ends_with("</svg>"),
        "Expected SVG document, got: {}",
        &markup[..80.min(markup.len())]
    );
    markup
}

/// Assert the file is a PNG; returns `(width, height, luma pixels)`.
pub fn assert_gray_png_file(path: &Path) -> (u32, u32, Vec<u8>) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(PNG_SIGNATURE),
        "Expected PNG, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let img = image::load_from_memory(&bytes)
        .expect("PNG should decode")
        .into_luma8();
    (img.width(), img.height(), img.into_raw())
}

/// Count occurrences of an SVG element, e.g. `"ellipse"`.
pub fn count_elements(markup: &str, element: &str) -> usize {
    markup.matches(&format!("<{element}")).count()
}

/// Assert the SVG canvas size.
pub fn assert_canvas(markup: &str, width: f64, height: f64) {
    let expected = format!(r#"viewBox="0 0 {width} {height}""#);
    assert!(
        markup.contains(&expected),
        "Expected {expected} in {}",
        &markup[..200.min(markup.len())]
    );
}

/// Assert that only the given file names exist in `dir`.
pub fn assert_dir_contents(dir: &Path, expected: &[&str]) {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);
}
