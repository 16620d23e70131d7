use crate::foundation::core::{Rect, RoundedRect};
use crate::render::plan::clamp_radius;

/// Rounded rect from origin and size, radius clamped to fit.
pub(crate) fn round_rect(x: f64, y: f64, w: f64, h: f64, r: f64) -> RoundedRect {
    let rect = Rect::new(x, y, x + w.max(0.0), y + h.max(0.0));
    RoundedRect::from_rect(rect, clamp_radius(r, rect))
}

/// Rect with only the top corners rounded.
pub(crate) fn top_rounded(rect: Rect, r: f64) -> RoundedRect {
    let r = clamp_radius(r, rect);
    RoundedRect::from_rect(rect, (r, r, 0.0, 0.0))
}

pub(crate) fn circle(cx: f64, cy: f64, r: f64) -> kurbo::Circle {
    kurbo::Circle::new((cx, cy), r)
}

pub(crate) fn hline(x0: f64, x1: f64, y: f64) -> kurbo::Line {
    kurbo::Line::new((x0, y), (x1, y))
}
