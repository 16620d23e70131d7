use super::*;

#[test]
fn encodes_straight_alpha_png() {
    // One opaque red pixel and one half-transparent white pixel, premultiplied.
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 128, 128, 128, 128],
        premultiplied: true,
    };
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [255, 255, 255, 128]);
}

#[test]
fn mismatched_buffer_is_a_serialization_failure() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: false,
    };
    let err = encode_png(&frame).unwrap_err();
    assert!(matches!(err, PolishError::SerializationFailure(_)));
}
