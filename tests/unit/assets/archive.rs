use std::io::{Cursor, Write};

use super::*;

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        w.start_file(*name, opts).unwrap();
        w.write_all(bytes).unwrap();
    }
    w.finish().unwrap().into_inner()
}

#[test]
fn entry_filter_matches_user_pngs_only() {
    assert!(is_png_entry("cells/a.png"));
    assert!(!is_png_entry("B.PNG"));
    assert!(!is_png_entry("__MACOSX/cells/._a.png"));
    assert!(!is_png_entry(".hidden.png"));
    assert!(!is_png_entry("notes.txt"));
    assert!(!is_png_entry("a.png.bak"));
}

#[test]
fn bundle_keeps_archive_order_and_skips_metadata() {
    let a = png(4, 3, [255, 0, 0, 255]);
    let b = png(2, 2, [0, 255, 0, 255]);
    let bytes = zip_of(&[
        ("first.png", a.as_slice()),
        ("__MACOSX/._first.png", &b"junk"[..]),
        ("readme.txt", &b"hello"[..]),
        ("dir/second.png", b.as_slice()),
    ]);

    let bundle = ImageBundle::from_zip_bytes(&bytes).unwrap();
    assert_eq!(bundle.names(), vec!["first.png", "dir/second.png"]);
    assert_eq!(bundle.first().unwrap().width(), 4);
    assert_eq!(bundle.get("dir/second.png").unwrap().height(), 2);
    assert!(bundle.get("readme.txt").is_none());
}

#[test]
fn archive_without_png_is_an_error() {
    let bytes = zip_of(&[("readme.txt", &b"hello"[..])]);
    let err = ImageBundle::from_zip_bytes(&bytes).unwrap_err();
    assert!(matches!(err, MaskpaintError::Archive(_)));
    assert!(err.to_string().contains("no PNG"));
}

#[test]
fn non_zip_bytes_are_an_archive_error() {
    let err = ImageBundle::from_zip_bytes(b"definitely not a zip").unwrap_err();
    assert!(matches!(err, MaskpaintError::Archive(_)));
}

#[test]
fn single_file_input_must_be_png() {
    let dir = std::path::PathBuf::from("target").join("bundle_inputs");
    std::fs::create_dir_all(&dir).unwrap();

    let png_path = dir.join("cells.png");
    std::fs::write(&png_path, png(3, 2, [10, 20, 30, 255])).unwrap();
    let bundle = ImageBundle::from_path(&png_path).unwrap();
    assert_eq!(bundle.names(), vec!["cells.png"]);

    let jpg_path = dir.join("cells.jpg");
    image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]))
        .save_with_format(&jpg_path, image::ImageFormat::Jpeg)
        .unwrap();
    let err = ImageBundle::from_path(&jpg_path).unwrap_err();
    assert!(matches!(err, MaskpaintError::Validation(_)));
}
