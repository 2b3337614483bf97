use crate::error::RenderError;
use halftone_core::RasterImage;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use tiny_skia::Pixmap;

/// Largest preview edge in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 16_384;

/// Rasterize SVG markup into an 8-bit grayscale PNG.
///
/// The canvas is the SVG size times `scale`, rounded up, on a white
/// background.
pub fn render_preview(svg_data: &[u8], scale: f32) -> Result<Vec<u8>, RenderError> {
    let pixmap = rasterize_svg(svg_data, scale)?;
    let gray = RasterImage::new(
        rgba_to_gray(pixmap.data()),
        pixmap.width() as usize,
        pixmap.height() as usize,
    );
    encode_gray_png(&gray)
}

/// Parse and rasterize SVG to an RGBA pixmap
fn rasterize_svg(svg_data: &[u8], scale: f32) -> Result<Pixmap, RenderError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RenderError::Config(format!(
            "preview scale must be > 0, got {scale}"
        )));
    }
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let svg_size = tree.size();
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;
    if width > MAX_PREVIEW_EDGE || height > MAX_PREVIEW_EDGE {
        return Err(RenderError::Config(format!(
            "preview of {width}x{height} exceeds {MAX_PREVIEW_EDGE} px per edge"
        )));
    }

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    tracing::debug!(width, height, "Rasterized preview");

    Ok(pixmap)
}

/// Luma of RGBA pixel data, alpha-composited against white.
fn rgba_to_gray(rgba_data: &[u8]) -> Vec<u8> {
    rgba_data
        .chunks_exact(4)
        .map(|pixel| {
            let (r, g, b, a) = (pixel[0] as u32, pixel[1] as u32, pixel[2] as u32, pixel[3]);
            // Rec. 601 weights in fixed point
            let luma = (299 * r + 587 * g + 114 * b + 500) / 1000;
            match a {
                255 => luma as u8,
                0 => 255,
                _ => {
                    // tiny-skia stores premultiplied color
                    let a = a as u32;
                    (luma + (255 - a)).min(255) as u8
                }
            }
        })
        .collect()
}

/// Encode a grayscale image as an 8-bit PNG and recompress it.
pub fn encode_gray_png(image: &RasterImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width() as u32, image.height() as u32);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.pixels())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::debug!(%e, "oxipng failed, keeping fast encoding");
            Ok(png_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_gray_png_round_trip() {
        let image = RasterImage::new(vec![0, 255, 255, 0, 128, 64], 3, 2);
        let bytes = encode_gray_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(pixels, image.pixels());
    }

    #[test]
    fn test_render_preview_size_and_content() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect x="0" y="0" width="10" height="10" fill="#000000"/></svg>"##;
        let bytes = render_preview(svg, 2.0).unwrap();
        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (40, 20));
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        // Left half black, right half white
        assert_eq!(pixels[5 * 40 + 5], 0);
        assert_eq!(pixels[5 * 40 + 35], 255);
    }

    #[test]
    fn test_render_preview_rejects_bad_svg() {
        let err = render_preview(b"<not svg", 1.0).unwrap_err();
        assert!(matches!(err, RenderError::SvgParse(_)));
    }

    #[test]
    fn test_render_preview_rejects_bad_scale() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"/>"#;
        assert!(matches!(
            render_preview(svg, 0.0).unwrap_err(),
            RenderError::Config(_)
        ));
    }

    #[test]
    fn test_rgba_to_gray_composites_on_white() {
        let rgba = [0, 0, 0, 255, 0, 0, 0, 0, 255, 255, 255, 255, 0, 0, 0, 128];
        assert_eq!(rgba_to_gray(&rgba), vec![0, 255, 255, 127]);
    }
}
