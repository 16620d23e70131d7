use rayon::prelude::*;

use crate::foundation::core::{PixelSize, Point};
use crate::foundation::error::{PolishError, PolishResult};
use crate::render::gradient::{PremulF, axis_t, over_f, premul_f, quantize, sample_stops};
use crate::render::plan::GradientStop;
use crate::style::model::{Background, MeshBlob};

/// Core alpha of a mesh blob at its center.
const MESH_BLOB_ALPHA: f64 = 0.8;

/// Rasterize `background` over the full canvas at `scale`.
///
/// Returns a premultiplied RGBA8 buffer of `canvas * scale` pixels. Each device pixel samples
/// the background at its center mapped back to logical coordinates, so every scale samples the
/// same continuous image.
pub fn render_background(
    background: &Background,
    canvas: PixelSize,
    scale: u32,
) -> PolishResult<Vec<u8>> {
    if scale == 0 {
        return Err(PolishError::invalid_input("scale must be >= 1"));
    }
    let width = canvas
        .width
        .checked_mul(scale)
        .ok_or_else(|| PolishError::invalid_input("background target width overflows"))?;
    let height = canvas
        .height
        .checked_mul(scale)
        .ok_or_else(|| PolishError::invalid_input("background target height overflows"))?;
    let device = PixelSize::new(width, height)?;
    let mut out = vec![0u8; device.rgba_len()];

    let shader = Shader::new(background, canvas);
    if let Shader::Clear = shader {
        return Ok(out);
    }

    let s = f64::from(scale);
    let row_bytes = width as usize * 4;
    out.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(py, row)| {
            let y = (py as f64 + 0.5) / s;
            for (px, dst) in row.chunks_exact_mut(4).enumerate() {
                let p = Point::new((px as f64 + 0.5) / s, y);
                dst.copy_from_slice(&quantize(shader.eval(p)));
            }
        });
    Ok(out)
}

enum Shader {
    Clear,
    Flat(PremulF),
    Linear {
        start: Point,
        end: Point,
        stops: [GradientStop; 2],
    },
    Mesh {
        base: PremulF,
        blobs: Vec<Blob>,
    },
}

struct Blob {
    center: Point,
    radius: f64,
    core: PremulF,
}

impl Shader {
    fn new(background: &Background, canvas: PixelSize) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        match background {
            Background::Transparent => Self::Clear,
            Background::Solid { color } => Self::Flat(premul_f(*color)),
            Background::Gradient { from, to, angle } => {
                let (start, end) = gradient_axis(w, h, *angle);
                Self::Linear {
                    start,
                    end,
                    stops: [
                        GradientStop {
                            offset: 0.0,
                            color: *from,
                        },
                        GradientStop {
                            offset: 1.0,
                            color: *to,
                        },
                    ],
                }
            }
            Background::Mesh { base, blobs } => Self::Mesh {
                base: premul_f(*base),
                blobs: blobs.iter().map(|b| mesh_blob(b, w, h)).collect(),
            },
        }
    }

    fn eval(&self, p: Point) -> PremulF {
        match self {
            Self::Clear => [0.0; 4],
            Self::Flat(c) => *c,
            Self::Linear { start, end, stops } => sample_stops(stops, axis_t(p, *start, *end)),
            Self::Mesh { base, blobs } => blobs.iter().fold(*base, |acc, b| {
                if b.radius <= 0.0 {
                    return acc;
                }
                let t = (p - b.center).hypot() / b.radius;
                if t >= 1.0 {
                    return acc;
                }
                let k = 1.0 - t;
                over_f(acc, b.core.map(|c| c * k))
            }),
        }
    }
}

fn mesh_blob(b: &MeshBlob, w: f64, h: f64) -> Blob {
    Blob {
        center: Point::new(w * b.cx, h * b.cy),
        radius: w.max(h) * b.r,
        core: premul_f(b.color.with_alpha(b.color.a * MESH_BLOB_ALPHA)),
    }
}

/// Gradient axis for a `w x h` canvas: a segment of length `hypot(w, h)` through the center,
/// rotated by `angle_deg` (0 = left to right, 90 = top to bottom).
pub(crate) fn gradient_axis(w: f64, h: f64, angle_deg: f64) -> (Point, Point) {
    let rad = angle_deg.to_radians();
    let center = Point::new(w / 2.0, h / 2.0);
    let len = (w * w + h * h).sqrt() / 2.0;
    let v = kurbo::Vec2::new(rad.cos(), rad.sin()) * len;
    (center - v, center + v)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
