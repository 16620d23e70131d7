use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = decode_image(&png_bytes(1, 1, vec![100, 50, 200, 128])).unwrap();
    assert_eq!((img.width(), img.height()), (1, 1));
    assert_eq!(
        img.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
    assert!(SourceImage::from_encoded(b"").is_err());
}

#[test]
fn svg_detection_and_raster() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
        <rect width="4" height="2" fill="#ff0000"/></svg>"##;
    assert!(looks_like_svg(svg));
    assert!(!looks_like_svg(&png_bytes(1, 1, vec![0, 0, 0, 0])));

    let img = SourceImage::from_encoded(svg).unwrap();
    assert_eq!((img.width(), img.height()), (4, 2));
    assert_eq!(&img.data()[..4], &[255, 0, 0, 255]);

    let big = rasterize_svg(svg, Some((8, 4))).unwrap();
    assert_eq!((big.width(), big.height()), (8, 4));
}

#[test]
fn malformed_svg_is_rejected() {
    assert!(parse_svg(b"<svg").is_err());
    assert!(rasterize_svg(b"<svg", None).is_err());
}
