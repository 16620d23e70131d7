use super::*;
use crate::style::color::rgb;

fn stops(list: &[(f64, Color)]) -> Vec<GradientStop> {
    list.iter()
        .map(|&(offset, color)| GradientStop { offset, color })
        .collect()
}

#[test]
fn axis_projection_clamps_outside_the_segment() {
    let (s, e) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(axis_t(Point::new(5.0, 7.0), s, e), 0.5);
    assert_eq!(axis_t(Point::new(-5.0, 0.0), s, e), 0.0);
    assert_eq!(axis_t(Point::new(50.0, 0.0), s, e), 1.0);
    assert_eq!(axis_t(Point::new(3.0, 3.0), s, s), 0.0);
}

#[test]
fn stops_interpolate_and_pad() {
    let st = stops(&[(0.0, rgb(0x000000)), (1.0, rgb(0xffffff))]);
    assert_eq!(quantize(sample_stops(&st, 0.5)), [128, 128, 128, 255]);
    assert_eq!(quantize(sample_stops(&st, -1.0)), [0, 0, 0, 255]);
    assert_eq!(quantize(sample_stops(&st, 2.0)), [255, 255, 255, 255]);

    let three = stops(&[
        (0.0, rgb(0x000000)),
        (0.5, rgb(0xff0000)),
        (1.0, rgb(0x000000)),
    ]);
    assert_eq!(quantize(sample_stops(&three, 0.5)), [255, 0, 0, 255]);
    assert_eq!(sample_stops(&[], 0.3), [0.0; 4]);
}

#[test]
fn fading_to_transparent_keeps_color_premultiplied() {
    let c = rgb(0xffffff);
    let st = stops(&[(0.0, c.with_alpha(0.8)), (1.0, c.with_alpha(0.0))]);
    let mid = quantize(sample_stops(&st, 0.5));
    assert_eq!(mid, [102, 102, 102, 102]);
}

#[test]
fn over_f_matches_integer_blend() {
    let out = quantize(over_f([1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 0.5]));
    assert_eq!(out, [128, 128, 128, 255]);
}
