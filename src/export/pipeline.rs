use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::SourceImage;
use crate::compose::compositor::Compositor;
use crate::export::capability::Capability;
use crate::export::png::encode_png;
use crate::export::sink::ExportSink;
use crate::export::watermark::watermark_run;
use crate::foundation::error::{PolishError, PolishResult};
use crate::render::RenderBackend;
use crate::render::plan::DrawOp;
use crate::style::model::StyleState;

/// A finished PNG export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    /// Device pixels.
    pub width: u32,
    pub height: u32,
    /// `shotpolish-<unix millis>.png`.
    pub file_name: String,
    pub watermarked: bool,
}

impl ExportedFile {
    /// File name for an export taken at `unix_millis`.
    pub fn file_name_at(unix_millis: u128) -> String {
        format!("shotpolish-{unix_millis}.png")
    }
}

/// Render at `style.export_scale`, watermark unless `capability` grants full access, encode PNG.
#[tracing::instrument(skip_all, fields(scale = style.export_scale))]
pub fn export(
    compositor: &Compositor,
    style: &StyleState,
    image: Option<&SourceImage>,
    capability: &dyn Capability,
    backend: &mut dyn RenderBackend,
) -> PolishResult<ExportedFile> {
    let scale = style.export_scale;
    let (geom, mut plan) = compositor.plan(style, image)?;
    geom.device_size(scale)?;

    let watermarked = !capability.has_full_access();
    if watermarked {
        plan.ops.push(DrawOp::Text(watermark_run(geom.canvas_size())));
    }

    let frame = backend.render_plan(&plan, scale)?;
    let bytes = encode_png(&frame)?;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| PolishError::serialization(format!("system clock before epoch: {e}")))?
        .as_millis();

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        watermarked,
        bytes = bytes.len(),
        "export encoded"
    );
    Ok(ExportedFile {
        bytes,
        width: frame.width,
        height: frame.height,
        file_name: ExportedFile::file_name_at(millis),
        watermarked,
    })
}

/// [`export`], then hand the file to `sink`. Nothing is delivered if any step fails.
pub fn export_to(
    compositor: &Compositor,
    style: &StyleState,
    image: Option<&SourceImage>,
    capability: &dyn Capability,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn ExportSink,
) -> PolishResult<ExportedFile> {
    let file = export(compositor, style, image, capability, backend)?;
    sink.deliver(&file)?;
    Ok(file)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
