use std::sync::Arc;

use crate::assets::SourceImage;
use crate::foundation::error::{PolishError, PolishResult};
use crate::frames::registry::FrameRegistry;
use crate::frames::FrameContext;
use crate::layout::geometry::{self, CanvasGeometry};
use crate::render::plan::{DrawList, DrawOp, Painter, clamp_radius};
use crate::render::{FrameRGBA, RenderBackend};
use crate::style::model::StyleState;

/// Builds scale-independent draw lists from a style and a screenshot.
///
/// Holds only the frame registry, so one compositor can be shared across threads while each
/// caller owns its raster backend.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    registry: FrameRegistry,
}

impl Compositor {
    pub fn new(registry: FrameRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Canvas layout for an image of `image` pixels under `style`.
    pub fn geometry(
        &self,
        style: &StyleState,
        image: crate::foundation::core::PixelSize,
    ) -> PolishResult<CanvasGeometry> {
        style.validate()?;
        let renderer = self.registry.get(style.frame.key())?;
        geometry::resolve(
            image,
            style.padding,
            renderer.margins(image),
            style.aspect_ratio,
        )
    }

    /// Record the composition: background, shadow, frame under, screenshot, frame over.
    ///
    /// The result does not depend on the output scale.
    #[tracing::instrument(skip_all, fields(frame = style.frame.key()))]
    pub fn plan(
        &self,
        style: &StyleState,
        image: Option<&SourceImage>,
    ) -> PolishResult<(CanvasGeometry, DrawList)> {
        let image = image.ok_or(PolishError::NoImageLoaded)?;
        let renderer = self.registry.get(style.frame.key())?;
        let geom = self.geometry(style, image.size())?;

        let image_rect = geom.image_rect();
        let ctx = FrameContext {
            content: geom.content_rect(),
            image: image_rect,
            url: style.frame.url(),
        };

        let mut ops = vec![DrawOp::Background(style.background.clone())];

        let shadow = &style.shadow;
        if shadow.enabled && shadow.opacity > 0.0 {
            ops.push(DrawOp::Shadow {
                rect: image_rect,
                radius: clamp_radius(style.radius, image_rect),
                blur: shadow.blur,
                offset_y: shadow.y_offset,
                opacity: shadow.opacity / 100.0,
            });
        }

        let key = style.frame.key();
        run_phase("under", key, &mut ops, |p| renderer.under(&ctx, p));

        let mut painter = Painter::new();
        painter.image(Arc::new(image.clone()), image_rect, style.radius);
        ops.extend(painter.into_ops());

        run_phase("over", key, &mut ops, |p| renderer.over(&ctx, p));

        Ok((
            geom,
            DrawList {
                canvas: geom.canvas_size(),
                ops,
            },
        ))
    }

    /// Rasterize the composition at `scale` device pixels per logical pixel.
    #[tracing::instrument(skip(self, style, image, backend))]
    pub fn render(
        &self,
        style: &StyleState,
        image: Option<&SourceImage>,
        scale: u32,
        backend: &mut dyn RenderBackend,
    ) -> PolishResult<FrameRGBA> {
        if scale == 0 {
            return Err(PolishError::invalid_input("scale must be >= 1"));
        }
        let (geom, plan) = self.plan(style, image)?;
        geom.device_size(scale)?;
        backend.render_plan(&plan, scale)
    }

    /// Scale-1 render for on-screen display. Never watermarked.
    pub fn preview(
        &self,
        style: &StyleState,
        image: Option<&SourceImage>,
        backend: &mut dyn RenderBackend,
    ) -> PolishResult<FrameRGBA> {
        self.render(style, image, 1, backend)
    }
}

/// Record one frame phase into its own painter; on error the phase contributes nothing.
fn run_phase(
    phase: &'static str,
    frame: &str,
    ops: &mut Vec<DrawOp>,
    draw: impl FnOnce(&mut Painter) -> PolishResult<()>,
) {
    let mut painter = Painter::new();
    match draw(&mut painter) {
        Ok(()) => ops.extend(painter.into_ops()),
        Err(PolishError::AssetUnavailable(reason)) => {
            tracing::debug!(frame, phase, %reason, "frame phase skipped, asset not ready");
        }
        Err(e) => {
            tracing::warn!(frame, phase, error = %e, "frame phase failed, skipped");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
