use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}

#[test]
fn over_with_opaque_src_replaces_dst() {
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255]), [9, 8, 7, 255]);
    assert_eq!(over([1, 2, 3, 255], [0, 0, 0, 0]), [1, 2, 3, 255]);
}

#[test]
fn over_half_black_on_white() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn premultiply_and_unpremultiply_are_inverse_for_opaque() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(px[4], 100);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[199, 100, 0, 128]);
}

#[test]
fn round_px_is_half_up() {
    assert_eq!(round_px(919.5), 920);
    assert_eq!(round_px(919.49), 919);
    assert_eq!(round_px(-3.0), 0);
}
