use super::*;
use crate::assets::slot::AssetSlot;
use crate::foundation::core::{Edges, PixelSize};
use crate::frames::FrameRenderer;
use crate::frames::bitmap::{BitmapFrame, SkinLayer};
use crate::style::model::{FrameStyle, ShadowStyle};
use kurbo::{Rect, Size};

fn screenshot(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, vec![200; (w * h * 4) as usize]).unwrap()
}

fn kinds(plan: &DrawList) -> Vec<&'static str> {
    plan.ops
        .iter()
        .map(|op| match op {
            DrawOp::Background(_) => "background",
            DrawOp::Shadow { .. } => "shadow",
            DrawOp::Fill { .. } => "fill",
            DrawOp::Image { .. } => "image",
            DrawOp::Text(_) => "text",
        })
        .collect()
}

#[test]
fn plain_plan_is_background_shadow_image() {
    let comp = Compositor::default();
    let (geom, plan) = comp
        .plan(&StyleState::default(), Some(&screenshot(800, 600)))
        .unwrap();
    assert_eq!((geom.canvas_w, geom.canvas_h), (920, 720));
    assert_eq!(plan.canvas, PixelSize::new(920, 720).unwrap());
    assert_eq!(kinds(&plan), ["background", "shadow", "image"]);

    let DrawOp::Shadow {
        rect,
        radius,
        opacity,
        ..
    } = &plan.ops[1]
    else {
        unreachable!()
    };
    assert_eq!(*rect, Rect::new(60.0, 60.0, 860.0, 660.0));
    assert_eq!(*radius, 12.0);
    assert!((opacity - 0.4).abs() < 1e-12);
}

#[test]
fn disabled_or_zero_opacity_shadow_is_not_recorded() {
    let comp = Compositor::default();
    let img = screenshot(10, 10);
    let mut style = StyleState::default();
    style.shadow = ShadowStyle {
        enabled: false,
        ..ShadowStyle::default()
    };
    let (_, plan) = comp.plan(&style, Some(&img)).unwrap();
    assert_eq!(kinds(&plan), ["background", "image"]);

    style.shadow = ShadowStyle {
        opacity: 0.0,
        ..ShadowStyle::default()
    };
    let (_, plan) = comp.plan(&style, Some(&img)).unwrap();
    assert_eq!(kinds(&plan), ["background", "image"]);
}

#[test]
fn shadow_radius_is_clamped_to_the_image() {
    let comp = Compositor::default();
    let style = StyleState {
        radius: 500.0,
        ..StyleState::default()
    };
    let (_, plan) = comp.plan(&style, Some(&screenshot(100, 40))).unwrap();
    let DrawOp::Shadow { radius, .. } = &plan.ops[1] else {
        unreachable!()
    };
    assert_eq!(*radius, 20.0);
}

#[test]
fn frame_phases_surround_the_screenshot() {
    let comp = Compositor::default();
    let style = StyleState {
        frame: FrameStyle::Laptop,
        ..StyleState::default()
    };
    let (_, plan) = comp.plan(&style, Some(&screenshot(800, 500))).unwrap();
    let k = kinds(&plan);
    let image_at = k.iter().position(|k| *k == "image").unwrap();
    assert_eq!(&k[..2], ["background", "shadow"]);
    assert!(k[2..image_at].iter().all(|k| *k == "fill"));
    assert_eq!(image_at, 2 + 4);
    assert!(k[image_at + 1..].iter().all(|k| *k == "fill"));
}

#[test]
fn missing_image_and_unknown_frame_are_errors() {
    let comp = Compositor::default();
    let err = comp.plan(&StyleState::default(), None).unwrap_err();
    assert!(matches!(err, PolishError::NoImageLoaded));

    let style = StyleState {
        frame: FrameStyle::Skin {
            name: "nope".into(),
        },
        ..StyleState::default()
    };
    let err = comp.plan(&style, Some(&screenshot(4, 4))).unwrap_err();
    assert!(matches!(err, PolishError::InvalidInput(_)));
}

struct HalfBroken;

impl FrameRenderer for HalfBroken {
    fn margins(&self, _image: PixelSize) -> Edges {
        Edges::new(10, 10, 10, 10)
    }

    fn under(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        painter.fill(&ctx.content, crate::style::color::rgb(0x111111));
        Err(PolishError::invalid_input("boom"))
    }

    fn over(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        painter.fill(&ctx.content, crate::style::color::rgb(0x222222));
        Ok(())
    }
}

#[test]
fn failing_phase_is_discarded_without_aborting() {
    let mut registry = FrameRegistry::with_builtins();
    registry.register("half", Arc::new(HalfBroken));
    let comp = Compositor::new(registry);
    let style = StyleState {
        frame: FrameStyle::Skin {
            name: "half".into(),
        },
        ..StyleState::default()
    };
    let (geom, plan) = comp.plan(&style, Some(&screenshot(20, 20))).unwrap();
    assert_eq!(geom.margins, Edges::new(10, 10, 10, 10));
    assert_eq!(kinds(&plan), ["background", "shadow", "image", "fill"]);
}

#[test]
fn pending_skin_asset_degrades_to_no_chrome() {
    let slot = AssetSlot::pending("skin");
    let frame = BitmapFrame::new(
        slot.clone(),
        Size::new(40.0, 40.0),
        Rect::new(10.0, 10.0, 30.0, 30.0),
        SkinLayer::Over,
    )
    .unwrap();
    let mut registry = FrameRegistry::with_builtins();
    registry.register("tablet", Arc::new(frame));
    let comp = Compositor::new(registry);
    let style = StyleState {
        frame: FrameStyle::Skin {
            name: "tablet".into(),
        },
        ..StyleState::default()
    };
    let img = screenshot(20, 20);

    let (_, before) = comp.plan(&style, Some(&img)).unwrap();
    assert_eq!(kinds(&before), ["background", "shadow", "image"]);

    slot.fill(SourceImage::from_rgba8(4, 4, vec![255; 64]));
    let (_, after) = comp.plan(&style, Some(&img)).unwrap();
    assert_eq!(kinds(&after), ["background", "shadow", "image", "image"]);
}

#[test]
fn plan_is_deterministic() {
    let comp = Compositor::default();
    let style = StyleState {
        frame: FrameStyle::Phone,
        ..StyleState::default()
    };
    let img = screenshot(39, 84);
    let a = comp.plan(&style, Some(&img)).unwrap();
    let b = comp.plan(&style, Some(&img)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_scale_is_rejected_before_rendering() {
    struct Unreachable;
    impl RenderBackend for Unreachable {
        fn render_plan(&mut self, _plan: &DrawList, _scale: u32) -> PolishResult<FrameRGBA> {
            panic!("backend must not run");
        }
    }
    let comp = Compositor::default();
    let err = comp
        .render(&StyleState::default(), Some(&screenshot(2, 2)), 0, &mut Unreachable)
        .unwrap_err();
    assert!(matches!(err, PolishError::InvalidInput(_)));
}
