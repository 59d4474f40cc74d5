use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width(), 1);
    assert_eq!(decoded.height(), 1);
    assert_eq!(
        decoded.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_invalid_source() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, SquareError::InvalidSource(_)));
}

#[test]
fn premultiply_zero_alpha_clears_color() {
    let mut px = vec![10u8, 20, 30, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255]);
}
