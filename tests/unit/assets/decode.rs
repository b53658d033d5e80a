use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let decoded = decode_image("one.png", &png_bytes(img)).unwrap();
    assert_eq!(decoded.name(), "one.png");
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
fn decode_rejects_garbage() {
    assert!(decode_image("bad.png", b"not a png").is_err());
}

#[test]
fn byte_length_and_dimensions_are_checked() {
    assert!(BaseImage::from_rgba8("x", 2, 2, vec![0; 15]).is_err());
    assert!(BaseImage::from_rgba8("x", 0, 2, vec![]).is_err());
    assert!(BaseImage::from_rgba8("x", 70_000, 1, vec![0; 70_000 * 4]).is_err());
}

#[test]
fn id_follows_content_not_name() {
    let a = BaseImage::from_rgba8("a", 2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let b = BaseImage::from_rgba8("b", 2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let c = BaseImage::from_rgba8("a", 1, 2, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), c.id());
}

#[test]
fn decode_refuses_lossy_formats() {
    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 2, image::Rgb([9, 9, 9])))
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();
    assert!(decode_image("photo.png", &jpeg).is_err());
}
