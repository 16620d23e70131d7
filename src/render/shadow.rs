use crate::foundation::core::Rect;
use crate::foundation::error::{PolishError, PolishResult};

/// Device-space parameters of one drop shadow.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShadowSpec {
    /// Shape rect, already offset and scaled to device pixels.
    pub rect: Rect,
    pub radius: f64,
    /// Gaussian sigma in device pixels.
    pub sigma: f64,
    /// Premultiplied shadow color.
    pub color: [u8; 4],
}

/// Largest blur sigma evaluated at full mask resolution.
const MAX_MASK_SIGMA: f64 = 8.0;

/// Composite a blurred rounded-rect shadow over `dst` (premultiplied RGBA8).
///
/// The mask is rasterized with analytic coverage, blurred at a reduced resolution when the
/// sigma is large, then upsampled bilinearly.
pub(crate) fn composite_shadow(
    dst: &mut [u8],
    width: u32,
    height: u32,
    spec: ShadowSpec,
) -> PolishResult<()> {
    if dst.len() != width as usize * height as usize * 4 {
        return Err(PolishError::invalid_input(
            "shadow target does not match width*height*4",
        ));
    }
    if spec.color[3] == 0 || spec.rect.width() <= 0.0 || spec.rect.height() <= 0.0 {
        return Ok(());
    }

    let sigma = if spec.sigma.is_finite() { spec.sigma.max(0.0) } else { 0.0 };
    let factor = (sigma / MAX_MASK_SIGMA).floor().max(1.0);
    let reach = (3.0 * sigma).ceil() + factor;
    let bounds = spec.rect.inflate(reach, reach).expand();
    let canvas = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    let visible = bounds.intersect(canvas);
    if visible.width() <= 0.0 || visible.height() <= 0.0 {
        return Ok(());
    }

    let mask_w = (bounds.width() / factor).ceil() as u32 + 1;
    let mask_h = (bounds.height() / factor).ceil() as u32 + 1;
    let mut mask = vec![0u8; mask_w as usize * mask_h as usize];
    let center = spec.rect.center();
    let half = (spec.rect.width() / 2.0, spec.rect.height() / 2.0);
    let radius = spec.radius.clamp(0.0, half.0.min(half.1));
    for my in 0..mask_h {
        for mx in 0..mask_w {
            let x = bounds.x0 + (f64::from(mx) + 0.5) * factor;
            let y = bounds.y0 + (f64::from(my) + 0.5) * factor;
            let d = rounded_rect_sdf(x - center.x, y - center.y, half, radius);
            let coverage = (0.5 - d / factor).clamp(0.0, 1.0);
            mask[(my * mask_w + mx) as usize] = (coverage * 255.0).round() as u8;
        }
    }

    let mask_sigma = sigma / factor;
    if mask_sigma >= 0.25 {
        let radius = (3.0 * mask_sigma).ceil() as u32;
        mask = blur_alpha8(&mask, mask_w, mask_h, radius, mask_sigma as f32)?;
    }

    let [sr, sg, sb, sa] = spec.color.map(u32::from);
    for py in visible.y0 as u32..visible.y1 as u32 {
        let v = ((f64::from(py) + 0.5 - bounds.y0) / factor - 0.5).max(0.0);
        for px in visible.x0 as u32..visible.x1 as u32 {
            let u = ((f64::from(px) + 0.5 - bounds.x0) / factor - 0.5).max(0.0);
            let m = sample_bilinear(&mask, mask_w, mask_h, u, v);
            if m == 0 {
                continue;
            }
            let k = u32::from(m);
            let src = [sr * k, sg * k, sb * k, sa * k].map(|c| ((c + 127) / 255) as u8);
            let i = (py as usize * width as usize + px as usize) * 4;
            let out = crate::foundation::math::over(
                [dst[i], dst[i + 1], dst[i + 2], dst[i + 3]],
                src,
            );
            dst[i..i + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Signed distance from a point (relative to the rect center) to a rounded rect.
fn rounded_rect_sdf(x: f64, y: f64, half: (f64, f64), radius: f64) -> f64 {
    let qx = x.abs() - (half.0 - radius);
    let qy = y.abs() - (half.1 - radius);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

fn sample_bilinear(mask: &[u8], w: u32, h: u32, u: f64, v: f64) -> u8 {
    let x0 = (u.floor() as u32).min(w - 1);
    let y0 = (v.floor() as u32).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = u - u.floor();
    let fy = v - v.floor();
    let at = |x: u32, y: u32| f64::from(mask[(y * w + x) as usize]);
    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}

/// Separable gaussian blur of a single 8-bit channel with clamp-to-edge sampling.
pub(crate) fn blur_alpha8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> PolishResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| PolishError::invalid_input("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(PolishError::invalid_input(
            "blur_alpha8 expects src matching width*height",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PolishResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PolishError::invalid_input("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Rounding residue goes to the center tap.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[row + sx as usize]);
            }
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/shadow.rs"]
mod tests;
