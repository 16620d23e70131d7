use super::*;
use crate::export::sink::InMemorySink;
use crate::render::FrameRGBA;
use crate::render::plan::DrawList;

/// Records the plan and returns an opaque grey frame of the right size.
#[derive(Default)]
struct Recording {
    plans: Vec<(DrawList, u32)>,
}

impl RenderBackend for Recording {
    fn render_plan(&mut self, plan: &DrawList, scale: u32) -> PolishResult<FrameRGBA> {
        self.plans.push((plan.clone(), scale));
        let (w, h) = (plan.canvas.width * scale, plan.canvas.height * scale);
        Ok(FrameRGBA {
            width: w,
            height: h,
            data: vec![128; (w * h * 4) as usize],
            premultiplied: true,
        })
    }
}

fn screenshot() -> SourceImage {
    SourceImage::from_rgba8(8, 6, vec![255; 8 * 6 * 4]).unwrap()
}

fn has_watermark(plan: &DrawList) -> bool {
    plan.ops
        .iter()
        .any(|op| matches!(op, DrawOp::Text(run) if run.text == "shotpolish.com"))
}

#[test]
fn free_export_is_watermarked_at_export_scale() {
    let comp = Compositor::default();
    let style = StyleState {
        padding: 10,
        ..StyleState::default()
    };
    let mut backend = Recording::default();
    let file = export(&comp, &style, Some(&screenshot()), &false, &mut backend).unwrap();

    assert!(file.watermarked);
    assert_eq!((file.width, file.height), (56, 52));
    assert!(file.file_name.starts_with("shotpolish-"));
    assert!(file.file_name.ends_with(".png"));

    let (plan, scale) = &backend.plans[0];
    assert_eq!(*scale, 2);
    assert!(has_watermark(plan));
    assert!(matches!(plan.ops.last(), Some(DrawOp::Text(run)) if run.required));
}

#[test]
fn full_access_export_has_no_watermark() {
    let comp = Compositor::default();
    let mut backend = Recording::default();
    let file = export(
        &comp,
        &StyleState::default(),
        Some(&screenshot()),
        &|| true,
        &mut backend,
    )
    .unwrap();
    assert!(!file.watermarked);
    assert!(!has_watermark(&backend.plans[0].0));
}

#[test]
fn export_without_image_delivers_nothing() {
    let comp = Compositor::default();
    let mut backend = Recording::default();
    let mut sink = InMemorySink::default();
    let err = export_to(
        &comp,
        &StyleState::default(),
        None,
        &true,
        &mut backend,
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, PolishError::NoImageLoaded));
    assert!(sink.files.is_empty());
    assert!(backend.plans.is_empty());
}

#[test]
fn export_to_delivers_the_returned_file() {
    let comp = Compositor::default();
    let mut backend = Recording::default();
    let mut sink = InMemorySink::default();
    let file = export_to(
        &comp,
        &StyleState::default(),
        Some(&screenshot()),
        &true,
        &mut backend,
        &mut sink,
    )
    .unwrap();
    assert_eq!(sink.files, vec![file]);
}

#[test]
fn file_names_use_unix_millis() {
    assert_eq!(
        ExportedFile::file_name_at(1_700_000_000_123),
        "shotpolish-1700000000123.png"
    );
}
