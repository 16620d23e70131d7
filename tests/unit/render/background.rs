use super::*;
use crate::style::color::{Color, rgb};

fn px(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

#[test]
fn solid_fills_every_pixel() {
    let bg = Background::Solid {
        color: rgb(0x1a1a2e),
    };
    let out = render_background(&bg, size(3, 2), 2).unwrap();
    assert_eq!(out.len(), 6 * 4 * 4);
    assert!(out.chunks_exact(4).all(|p| p == [0x1a, 0x1a, 0x2e, 255]));
}

#[test]
fn transparent_clears_the_canvas() {
    let out = render_background(&Background::Transparent, size(4, 4), 1).unwrap();
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn horizontal_gradient_runs_from_left_to_right() {
    let bg = Background::Gradient {
        from: rgb(0x000000),
        to: rgb(0xffffff),
        angle: 0.0,
    };
    let out = render_background(&bg, size(100, 10), 1).unwrap();
    let left = px(&out, 100, 0, 5);
    let right = px(&out, 100, 99, 5);
    assert!(left[0] < 100 && right[0] > 155, "{left:?} {right:?}");
    // Rows are identical for a horizontal axis.
    assert_eq!(px(&out, 100, 40, 0), px(&out, 100, 40, 9));
}

#[test]
fn gradient_axis_matches_canvas_convention() {
    let (s, e) = gradient_axis(200.0, 0.0, 0.0);
    assert_eq!((s, e), (Point::new(0.0, 0.0), Point::new(200.0, 0.0)));
    let (s, e) = gradient_axis(100.0, 100.0, 90.0);
    assert!((s.x - 50.0).abs() < 1e-9 && e.y > s.y);
}

#[test]
fn mesh_blob_peaks_at_center_and_vanishes_outside_radius() {
    let bg = Background::Mesh {
        base: rgb(0x000000),
        blobs: vec![MeshBlob {
            cx: 0.5,
            cy: 0.5,
            r: 0.25,
            color: rgb(0xffffff),
        }],
    };
    let out = render_background(&bg, size(100, 100), 1).unwrap();
    let center = px(&out, 100, 50, 50);
    assert!(center[0] >= 195 && center[0] <= 204, "{center:?}");
    assert_eq!(px(&out, 100, 2, 2), [0, 0, 0, 255]);
}

#[test]
fn later_mesh_blobs_paint_over_earlier_ones() {
    let blob = |color: Color| MeshBlob {
        cx: 0.5,
        cy: 0.5,
        r: 1.0,
        color,
    };
    let bg = Background::Mesh {
        base: rgb(0x000000),
        blobs: vec![blob(rgb(0xff0000)), blob(rgb(0x0000ff))],
    };
    let out = render_background(&bg, size(8, 8), 1).unwrap();
    let c = px(&out, 8, 4, 4);
    assert!(c[2] > c[0], "{c:?}");
}

#[test]
fn flat_regions_agree_across_scales() {
    let bg = Background::Gradient {
        from: rgb(0x06b6d4),
        to: rgb(0x3b82f6),
        angle: 135.0,
    };
    let s1 = render_background(&bg, size(40, 30), 1).unwrap();
    let s3 = render_background(&bg, size(40, 30), 3).unwrap();
    // Device pixel (3x+1, 3y+1) at scale 3 has the same center as (x, y) at scale 1.
    for (x, y) in [(0, 0), (20, 15), (39, 29)] {
        assert_eq!(px(&s1, 40, x, y), px(&s3, 120, 3 * x + 1, 3 * y + 1));
    }
}

#[test]
fn zero_scale_is_rejected() {
    assert!(render_background(&Background::Transparent, size(1, 1), 0).is_err());
}
