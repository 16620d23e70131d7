use super::*;
use crate::style::color::rgb;

#[test]
fn radius_is_clamped_to_half_the_short_side() {
    let r = Rect::new(0.0, 0.0, 100.0, 40.0);
    assert_eq!(clamp_radius(500.0, r), 20.0);
    assert_eq!(clamp_radius(-3.0, r), 0.0);
    assert_eq!(clamp_radius(f64::NAN, r), 0.0);
    assert_eq!(clamp_radius(12.0, r), 12.0);
}

#[test]
fn stroke_records_a_fill_outline_wider_than_the_shape() {
    let mut p = Painter::new();
    let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
    p.stroke(&rect, 2.0, rgb(0x3a3a3a));
    let DrawOp::Fill { path, .. } = &p.ops()[0] else {
        panic!("expected fill");
    };
    let bb = path.bounding_box();
    assert!((bb.x0 - 9.0).abs() < 1e-6 && (bb.x1 - 21.0).abs() < 1e-6);

    p.stroke(&rect, 0.0, rgb(0x3a3a3a));
    assert_eq!(p.ops().len(), 1);
}

#[test]
fn image_transform_maps_pixels_onto_destination() {
    let img = Arc::new(SourceImage::from_rgba8(4, 2, vec![255; 32]).unwrap());
    let mut p = Painter::new();
    let dest = Rect::new(60.0, 160.0, 68.0, 164.0);
    p.image(img, dest, 100.0);
    let DrawOp::Image {
        transform, clip, ..
    } = &p.into_ops()[0]
    else {
        panic!("expected image");
    };
    assert_eq!(*transform * Point::new(4.0, 2.0), Point::new(68.0, 164.0));
    let bb = clip.bounding_box();
    assert!((bb.width() - 8.0).abs() < 1e-6 && (bb.height() - 4.0).abs() < 1e-6);
}

#[test]
fn linear_paint_collects_stops() {
    let paint = Paint::linear(
        Point::ZERO,
        Point::new(0.0, 10.0),
        [(0.0, rgb(0x2a2a2e)), (0.5, rgb(0x1e1e24)), (1.0, rgb(0x2a2a2e))],
    );
    let Paint::Linear { stops, .. } = paint else {
        panic!("expected linear");
    };
    assert_eq!(stops.len(), 3);
    assert!(!stops.spilled());
}
