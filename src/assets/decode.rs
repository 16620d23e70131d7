use anyhow::Context;

use crate::assets::SourceImage;
use crate::foundation::error::{PolishError, PolishResult};

// Keeps one rasterized skin well inside the backend's u16 pixmap limit.
const MAX_SVG_DIM: u32 = 16_384;

pub(crate) fn decode_image(bytes: &[u8]) -> PolishResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

pub(crate) fn parse_svg(bytes: &[u8]) -> PolishResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize an SVG document to premultiplied RGBA8.
///
/// `size` defaults to the document's intrinsic size (rounded up).
pub(crate) fn rasterize_svg(bytes: &[u8], size: Option<(u32, u32)>) -> PolishResult<SourceImage> {
    let tree = parse_svg(bytes)?;
    let (width, height) = match size {
        Some(s) => s,
        None => {
            let s = tree.size();
            (
                (s.width().ceil() as u32).max(1),
                (s.height().ceil() as u32).max(1),
            )
        }
    };
    if width == 0 || height == 0 || width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(PolishError::invalid_input(format!(
            "svg raster size {width}x{height} is outside 1..={MAX_SVG_DIM}"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PolishError::invalid_input("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    SourceImage::from_premul_rgba8(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
