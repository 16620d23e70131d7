use super::*;

#[test]
fn rejects_length_mismatch_and_zero_size() {
    assert!(SourceImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_premul_rgba8(0, 2, vec![]).is_err());
    let img = SourceImage::from_premul_rgba8(2, 1, vec![0; 8]).unwrap();
    assert_eq!(img.size(), PixelSize::new(2, 1).unwrap());
}

#[test]
fn straight_input_is_premultiplied() {
    let img = SourceImage::from_rgba8(1, 1, vec![200, 100, 0, 128]).unwrap();
    assert_eq!(img.data(), &[100, 50, 0, 128]);
}

#[test]
fn clones_share_pixels() {
    let a = SourceImage::from_rgba8(1, 1, vec![1, 2, 3, 255]).unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert!(format!("{a:?}").contains("width: 1"));
}
