use crate::foundation::core::{PixelSize, Point, Vec2};
use crate::render::plan::{TextAlign, TextBaseline, TextRun, TextShadow};
use crate::style::color::Color;

pub(crate) const WATERMARK_TEXT: &str = "shotpolish.com";

/// Font size for a logical canvas: 1.6% of the short side, kept within 11..=22.
pub(crate) fn font_size(canvas: PixelSize) -> f64 {
    let short = f64::from(canvas.width.min(canvas.height));
    (short * 0.016).round().clamp(11.0, 22.0)
}

/// Bottom-right watermark run in logical canvas coordinates.
pub(crate) fn watermark_run(canvas: PixelSize) -> TextRun {
    let size = font_size(canvas);
    let inset = (size * 0.9).round();
    TextRun {
        text: WATERMARK_TEXT.to_owned(),
        anchor: Point::new(
            f64::from(canvas.width) - inset,
            f64::from(canvas.height) - inset,
        ),
        align: TextAlign::Right,
        baseline: TextBaseline::Bottom,
        size,
        color: Color::rgba(1.0, 1.0, 1.0, 0.38),
        shadow: Some(TextShadow {
            color: Color::rgba(0.0, 0.0, 0.0, 0.45),
            blur: 6.0,
            offset: Vec2::new(0.0, 1.0),
        }),
        required: true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/watermark.rs"]
mod tests;
