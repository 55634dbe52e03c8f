use super::*;

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(Canvas::new(3, 2).unwrap()).unwrap();
    assert_eq!(s.data().len(), 24);
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn fill_stores_premultiplied_color() {
    let mut s = Surface::new(Canvas::new(2, 2).unwrap()).unwrap();
    s.fill(Rgba8::new(200, 100, 0, 128));
    let px = s.pixel(1, 1).unwrap();
    assert_eq!(px, Rgba8::new(200, 100, 0, 128).to_premul());

    let straight = s.to_straight_rgba8();
    assert!((i16::from(straight[0]) - 200).abs() <= 1);
    assert_eq!(straight[3], 128);
}

#[test]
fn copy_from_rejects_wrong_size() {
    let mut s = Surface::new(Canvas::new(2, 2).unwrap()).unwrap();
    assert!(matches!(
        s.copy_from(&[0u8; 4]),
        Err(CoverError::ImageLoad(_))
    ));
    s.copy_from(&[7u8; 16]).unwrap();
    assert_eq!(s.pixel(0, 0), Some([7, 7, 7, 7]));
}

#[test]
fn composite_layer_with_offset() {
    let canvas = Canvas::new(4, 4).unwrap();
    let mut s = Surface::new(canvas).unwrap();
    s.fill(Rgba8::BLACK);
    let mut layer = vec![0u8; canvas.rgba_len()];
    layer[0..4].copy_from_slice(&[255, 255, 255, 255]);

    s.composite(&layer, (2, 2), 1.0).unwrap();
    assert_eq!(s.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
}
