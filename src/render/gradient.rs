use crate::foundation::core::Point;
use crate::render::plan::GradientStop;
use crate::style::color::Color;

/// Premultiplied float RGBA in `0..=1`.
pub(crate) type PremulF = [f64; 4];

pub(crate) fn premul_f(c: Color) -> PremulF {
    let a = c.a.clamp(0.0, 1.0);
    [
        c.r.clamp(0.0, 1.0) * a,
        c.g.clamp(0.0, 1.0) * a,
        c.b.clamp(0.0, 1.0) * a,
        a,
    ]
}

pub(crate) fn quantize(c: PremulF) -> [u8; 4] {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let a = q(c[3]);
    // Premultiplied channels never exceed alpha.
    [q(c[0]).min(a), q(c[1]).min(a), q(c[2]).min(a), a]
}

/// Source-over of two premultiplied float colors.
pub(crate) fn over_f(dst: PremulF, src: PremulF) -> PremulF {
    let inv = 1.0 - src[3];
    [
        src[0] + dst[0] * inv,
        src[1] + dst[1] * inv,
        src[2] + dst[2] * inv,
        src[3] + dst[3] * inv,
    ]
}

/// Projection of `p` onto `start -> end`, clamped to `0..=1`.
pub(crate) fn axis_t(p: Point, start: Point, end: Point) -> f64 {
    let axis = end - start;
    let len2 = axis.hypot2();
    if len2 <= f64::EPSILON {
        return 0.0;
    }
    ((p - start).dot(axis) / len2).clamp(0.0, 1.0)
}

/// Interpolate sorted stops in premultiplied space; pads before the first and after the last.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> PremulF {
    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return premul_f(first.color);
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let k = if span <= f64::EPSILON {
                1.0
            } else {
                (t - a.offset) / span
            };
            let (ca, cb) = (premul_f(a.color), premul_f(b.color));
            return std::array::from_fn(|i| ca[i] + (cb[i] - ca[i]) * k);
        }
    }
    stops.last().map_or([0.0; 4], |s| premul_f(s.color))
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
