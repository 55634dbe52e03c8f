use std::io::Cursor;

use base64::Engine as _;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, px.repeat((w * h) as usize)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_image_load_error() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, CoverError::ImageLoad(_)));
}

#[test]
fn parse_classifies_urls() {
    assert_eq!(
        ImageRef::parse("https://placehold.co/1200x675/png").unwrap(),
        ImageRef::Remote("https://placehold.co/1200x675/png".to_string())
    );
    assert_eq!(
        ImageRef::parse("file:///tmp/bg.png").unwrap(),
        ImageRef::File(PathBuf::from("/tmp/bg.png"))
    );
    assert_eq!(
        ImageRef::parse("bg.jpg").unwrap(),
        ImageRef::File(PathBuf::from("bg.jpg"))
    );
    assert!(ImageRef::parse("  ").is_err());
}

#[test]
fn data_uri_round_trips_into_pixels() {
    let png = png_bytes(3, 2, [10, 20, 30, 255]);
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );
    let r = ImageRef::parse(&uri).unwrap();
    let ImageRef::DataUri { mime, .. } = &r else {
        panic!("expected data uri, got {r:?}");
    };
    assert_eq!(mime, "image/png");

    let img = load_image_ref(&r, Path::new(".")).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(&img.rgba8_premul[0..4], &[10, 20, 30, 255]);
    assert_eq!(img.canvas().unwrap(), Canvas::new(3, 2).unwrap());
}

#[test]
fn non_base64_data_uri_is_rejected() {
    assert!(ImageRef::parse("data:image/svg+xml,<svg/>").is_err());
    assert!(ImageRef::parse("data:image/png;base64,@@@").is_err());
}

#[test]
fn remote_and_missing_files_fail_to_load() {
    let remote = ImageRef::Remote("https://example.com/a.png".to_string());
    assert!(matches!(
        load_image_ref(&remote, Path::new(".")),
        Err(CoverError::ImageLoad(_))
    ));

    let missing = ImageRef::File(PathBuf::from("no/such/background.png"));
    assert!(matches!(
        load_image_ref(&missing, Path::new(".")),
        Err(CoverError::ImageLoad(_))
    ));
}
