use super::*;

#[test]
fn pixel_size_rejects_zero_dimensions() {
    assert!(PixelSize::new(0, 10).is_err());
    assert!(PixelSize::new(10, 0).is_err());
    let s = PixelSize::new(3, 2).unwrap();
    assert_eq!(s.rgba_len(), 24);
}

#[test]
fn edges_sum_axes() {
    let e = Edges::new(36, 24, 54, 20);
    assert_eq!(e.horizontal(), 44);
    assert_eq!(e.vertical(), 90);
    assert_eq!(Edges::ZERO, Edges::default());
}

#[test]
fn premul_round_trips_for_opaque_and_half_alpha() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    assert_eq!(c.to_straight(), [200, 100, 50, 255]);

    let half = Rgba8Premul::from_straight_rgba(255, 0, 0, 128);
    assert_eq!(half.r, 128);
    assert_eq!(half.to_straight(), [255, 0, 0, 128]);

    assert_eq!(Rgba8Premul::transparent().to_straight(), [0, 0, 0, 0]);
}

#[test]
fn with_opacity_scales_every_channel() {
    let c = Rgba8Premul::opaque(0, 0, 0).with_opacity(0.4);
    assert_eq!(c.a, 102);
    assert_eq!(Rgba8Premul::opaque(255, 255, 255).with_opacity(0.0).a, 0);
}
