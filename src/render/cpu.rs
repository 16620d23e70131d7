use std::path::PathBuf;
use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, PixelSize, Rect, Vec2};
use crate::foundation::error::{PolishError, PolishResult};
use crate::foundation::math::{over, over_in_place};
use crate::render::gradient::{axis_t, quantize, sample_stops};
use crate::render::plan::{DrawList, DrawOp, Paint, TextRun, TextShadow};
use crate::render::shadow::{ShadowSpec, blur_alpha8, composite_shadow};
use crate::render::text::{ShapedText, TextEngine};
use crate::render::{FrameRGBA, RenderBackend};

/// Options for [`CpuBackend`].
#[derive(Clone, Debug)]
pub struct CpuBackendOpts {
    /// Extra `.ttf`/`.otf`/`.ttc` files; faces found here are preferred for UI text.
    pub fonts_dir: Option<PathBuf>,
    /// Load the host's installed fonts.
    pub system_fonts: bool,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self {
            fonts_dir: None,
            system_fonts: true,
        }
    }
}

/// Executes a [`DrawList`] on the CPU with `vello_cpu`.
///
/// Vector ops are batched into one `RenderContext` layer; the background and shadow passes and
/// text shadows are computed directly on the accumulated premultiplied buffer.
pub struct CpuBackend {
    text: TextEngine,
}

impl CpuBackend {
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            text: TextEngine::new(opts.fonts_dir.as_deref(), opts.system_fonts),
        }
    }

    /// `true` when a font face is available for text ops.
    pub fn has_text(&self) -> bool {
        self.text.is_available()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(CpuBackendOpts::default())
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &DrawList, scale: u32) -> PolishResult<FrameRGBA> {
        if scale == 0 {
            return Err(PolishError::invalid_input("scale must be >= 1"));
        }
        let device = device_size(plan.canvas, scale)?;
        let w16: u16 = device.width.try_into().map_err(|_| {
            PolishError::invalid_input(format!("target width {} exceeds u16", device.width))
        })?;
        let h16: u16 = device.height.try_into().map_err(|_| {
            PolishError::invalid_input(format!("target height {} exceeds u16", device.height))
        })?;

        let mut target = vec![0u8; device.rgba_len()];
        let mut layer = VectorLayer::new(w16, h16, scale);

        for op in &plan.ops {
            match op {
                DrawOp::Background(bg) => {
                    layer.flush_into(&mut target)?;
                    let px = crate::render::background::render_background(bg, plan.canvas, scale)?;
                    over_in_place(&mut target, &px)?;
                }
                DrawOp::Shadow {
                    rect,
                    radius,
                    blur,
                    offset_y,
                    opacity,
                } => {
                    layer.flush_into(&mut target)?;
                    let s = f64::from(scale);
                    let rect = Rect::new(rect.x0, rect.y0 + offset_y, rect.x1, rect.y1 + offset_y);
                    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
                    composite_shadow(
                        &mut target,
                        device.width,
                        device.height,
                        ShadowSpec {
                            rect: Rect::new(rect.x0 * s, rect.y0 * s, rect.x1 * s, rect.y1 * s),
                            radius: radius * s,
                            sigma: blur / 2.0 * s,
                            color: [0, 0, 0, alpha],
                        },
                    )?;
                }
                DrawOp::Fill { path, paint } => layer.fill(path, paint, device)?,
                DrawOp::Image {
                    image,
                    transform,
                    clip,
                } => {
                    let pixmap =
                        pixmap_from_premul_bytes(image.data(), image.width(), image.height())?;
                    layer.fill_image(Arc::new(pixmap), *transform, clip);
                }
                DrawOp::Text(run) => {
                    let (Some(shaped), Some(font)) = (self.text.shape(run), self.text.font())
                    else {
                        if run.required {
                            return Err(PolishError::serialization(format!(
                                "text {:?} could not be rendered: no usable font face",
                                run.text
                            )));
                        }
                        tracing::debug!(text = %run.text, "skipping text op without a usable face");
                        continue;
                    };
                    if run.shadow.is_some() {
                        layer.flush_into(&mut target)?;
                        draw_text_shadow(&mut target, run, &shaped, font, w16, h16, scale)?;
                    }
                    layer.glyphs(&shaped, font, shaped_color(&shaped));
                }
            }
        }
        layer.flush_into(&mut target)?;

        Ok(FrameRGBA {
            width: device.width,
            height: device.height,
            data: target,
            premultiplied: true,
        })
    }
}

fn device_size(canvas: PixelSize, scale: u32) -> PolishResult<PixelSize> {
    match (canvas.width.checked_mul(scale), canvas.height.checked_mul(scale)) {
        (Some(w), Some(h)) => PixelSize::new(w, h),
        _ => Err(PolishError::invalid_input("render target size overflows")),
    }
}

/// Lazily created vello_cpu context for consecutive vector ops.
struct VectorLayer {
    ctx: Option<vello_cpu::RenderContext>,
    width: u16,
    height: u16,
    scale: f64,
    dirty: bool,
}

impl VectorLayer {
    fn new(width: u16, height: u16, scale: u32) -> Self {
        Self {
            ctx: None,
            width,
            height,
            scale: f64::from(scale),
            dirty: false,
        }
    }

    fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        self.dirty = true;
        let (w, h, s) = (self.width, self.height, self.scale);
        let ctx = self
            .ctx
            .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h));
        ctx.set_transform(affine_to_cpu(Affine::scale(s)));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx
    }

    fn fill(&mut self, path: &BezPath, paint: &Paint, device: PixelSize) -> PolishResult<()> {
        match paint {
            Paint::Solid(color) => {
                let [r, g, b, a] = color.to_rgba8();
                let ctx = self.ctx();
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_path(&bezpath_to_cpu(path));
            }
            Paint::Linear { .. } => {
                let Some((image, paint_transform)) = self.gradient_image(path, paint, device)?
                else {
                    return Ok(());
                };
                let ctx = self.ctx();
                ctx.set_paint_transform(affine_to_cpu(paint_transform));
                ctx.set_paint(image);
                ctx.fill_path(&bezpath_to_cpu(path));
            }
        }
        Ok(())
    }

    /// Rasterize a gradient over the device-space bounds of `path`.
    ///
    /// Returns the image paint and its paint transform (image pixels -> logical).
    fn gradient_image(
        &self,
        path: &BezPath,
        paint: &Paint,
        device: PixelSize,
    ) -> PolishResult<Option<(vello_cpu::Image, Affine)>> {
        let Paint::Linear { start, end, stops } = paint else {
            return Ok(None);
        };
        let s = self.scale;
        let bb = path.bounding_box();
        let dev = Rect::new(bb.x0 * s, bb.y0 * s, bb.x1 * s, bb.y1 * s)
            .expand()
            .intersect(Rect::new(
                0.0,
                0.0,
                f64::from(device.width),
                f64::from(device.height),
            ));
        if dev.width() < 1.0 || dev.height() < 1.0 {
            return Ok(None);
        }
        let (gw, gh) = (dev.width() as u32, dev.height() as u32);
        let mut bytes = Vec::with_capacity(gw as usize * gh as usize * 4);
        for y in 0..gh {
            let ly = (dev.y0 + f64::from(y) + 0.5) / s;
            for x in 0..gw {
                let lx = (dev.x0 + f64::from(x) + 0.5) / s;
                let t = axis_t(kurbo::Point::new(lx, ly), *start, *end);
                bytes.extend_from_slice(&quantize(sample_stops(stops, t)));
            }
        }
        let pixmap = pixmap_from_premul_bytes(&bytes, gw, gh)?;
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let transform = Affine::translate((dev.x0 / s, dev.y0 / s)) * Affine::scale(1.0 / s);
        Ok(Some((image, transform)))
    }

    fn fill_image(&mut self, pixmap: Arc<vello_cpu::Pixmap>, transform: Affine, clip: &BezPath) {
        let ctx = self.ctx();
        ctx.set_paint_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(pixmap),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_path(&bezpath_to_cpu(clip));
    }

    fn glyphs(&mut self, shaped: &ShapedText, font: &vello_cpu::peniko::FontData, color: [u8; 4]) {
        let ctx = self.ctx();
        draw_glyphs(ctx, shaped, font, color);
    }

    fn flush_into(&mut self, target: &mut [u8]) -> PolishResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        ctx.reset();
        over_in_place(target, pixmap.data_as_u8_slice())
    }
}

fn shaped_color(shaped: &ShapedText) -> [u8; 4] {
    let b = shaped.brush;
    [b.r, b.g, b.b, b.a]
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    shaped: &ShapedText,
    font: &vello_cpu::peniko::FontData,
    [r, g, b, a]: [u8; 4],
) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.glyph_run(font)
        .font_size(shaped.font_size)
        .fill_glyphs(shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        }));
}

/// Device-pixel region `(x, y, w, h)` a text shadow can touch, clipped to the target.
fn text_shadow_region(
    bounds: Rect,
    font_size: f32,
    shadow: &TextShadow,
    scale: u32,
    width: u32,
    height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let s = f64::from(scale);
    let sigma = shadow.blur / 2.0 * s;
    let reach = if sigma >= 0.25 { (3.0 * sigma).ceil() } else { 0.0 };
    // Ink overhang past the layout box, a quarter em.
    let overhang = (f64::from(font_size) * 0.25 * s).ceil();
    let region = (Rect::new(bounds.x0 * s, bounds.y0 * s, bounds.x1 * s, bounds.y1 * s)
        + shadow.offset * s)
        .inflate(reach + overhang, reach + overhang)
        .expand()
        .intersect(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
    if !(region.width() >= 1.0 && region.height() >= 1.0) {
        return None;
    }
    Some((
        region.x0 as u32,
        region.y0 as u32,
        region.width() as u32,
        region.height() as u32,
    ))
}

/// Render the glyph coverage alone, blur it and composite it tinted and offset.
///
/// Only the region around the shaped run is rasterized and blurred.
fn draw_text_shadow(
    target: &mut [u8],
    run: &TextRun,
    shaped: &ShapedText,
    font: &vello_cpu::peniko::FontData,
    width: u16,
    height: u16,
    scale: u32,
) -> PolishResult<()> {
    let Some(shadow) = run.shadow else {
        return Ok(());
    };
    let (w, h) = (u32::from(width), u32::from(height));
    let Some((rx, ry, rw, rh)) =
        text_shadow_region(shaped.bounds, shaped.font_size, &shadow, scale, w, h)
    else {
        return Ok(());
    };
    let to_u16 = |v: u32| {
        u16::try_from(v).map_err(|_| PolishError::invalid_input("text shadow region exceeds u16"))
    };
    let (rw16, rh16) = (to_u16(rw)?, to_u16(rh)?);

    let s = f64::from(scale);
    let mut ctx = vello_cpu::RenderContext::new(rw16, rh16);
    ctx.set_transform(affine_to_cpu(
        Affine::translate(shadow.offset * s - Vec2::new(f64::from(rx), f64::from(ry)))
            * Affine::scale(s),
    ));
    draw_glyphs(&mut ctx, shaped, font, [0, 0, 0, 255]);
    let mut pixmap = vello_cpu::Pixmap::new(rw16, rh16);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let mut mask: Vec<u8> = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    let sigma = shadow.blur / 2.0 * s;
    if sigma >= 0.25 {
        mask = blur_alpha8(&mask, rw, rh, (3.0 * sigma).ceil() as u32, sigma as f32)?;
    }

    let tint = shadow.color.to_rgba8_premul().to_array().map(u32::from);
    let row_bytes = rw as usize * 4;
    for (row, mask_row) in mask.chunks_exact(rw as usize).enumerate() {
        let start = ((ry as usize + row) * w as usize + rx as usize) * 4;
        let Some(dst_row) = target.get_mut(start..start + row_bytes) else {
            return Err(PolishError::invalid_input(
                "text shadow region outside the target",
            ));
        };
        for (dst, &m) in dst_row.chunks_exact_mut(4).zip(mask_row) {
            if m == 0 {
                continue;
            }
            let k = u32::from(m);
            let src = tint.map(|c| ((c * k + 127) / 255) as u8);
            let out = over([dst[0], dst[1], dst[2], dst[3]], src);
            dst.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PolishResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PolishError::invalid_input("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PolishError::invalid_input("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PolishError::invalid_input("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
