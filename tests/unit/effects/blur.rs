use super::*;

#[test]
fn css_blur_length_maps_to_three_sigma_kernel() {
    assert_eq!(kernel_for_blur_px(0.0), (0, 0.0));
    assert_eq!(kernel_for_blur_px(-3.0), (0, 0.0));
    assert_eq!(kernel_for_blur_px(f64::NAN), (0, 0.0));
    assert_eq!(kernel_for_blur_px(4.0), (12, 4.0));
    assert_eq!(kernel_for_blur_px(0.2), (1, 0.2));
}

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 12], 2, 2, 1, 1.0).is_err());
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn region_blur_leaves_outside_untouched() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut buf = vec![0u8; canvas.rgba_len()];
    let far = ((9 * 10 + 9) * 4) as usize;
    buf[far..far + 4].copy_from_slice(&[255, 255, 255, 255]);
    let inside = ((2 * 10 + 2) * 4) as usize;
    buf[inside..inside + 4].copy_from_slice(&[255, 255, 255, 255]);

    blur_region_in_place(&mut buf, canvas, Rect::new(0.0, 0.0, 5.0, 5.0), 2, 1.0).unwrap();

    assert_eq!(&buf[far..far + 4], &[255, 255, 255, 255]);
    assert!(buf[inside + 3] < 255);
    let neighbour = ((2 * 10 + 3) * 4) as usize;
    assert!(buf[neighbour + 3] > 0);
}

#[test]
fn region_blur_outside_canvas_is_noop() {
    let canvas = Canvas::new(4, 4).unwrap();
    let mut buf = vec![9u8; canvas.rgba_len()];
    blur_region_in_place(&mut buf, canvas, Rect::new(10.0, 10.0, 20.0, 20.0), 3, 1.0).unwrap();
    assert!(buf.iter().all(|&b| b == 9));
}

#[test]
fn kernel_weights_sum_to_one() {
    for (radius, sigma) in [(1, 0.2), (3, 1.0), (12, 4.0), (60, 20.0)] {
        let k = gaussian_kernel_q16(radius, sigma).unwrap();
        assert_eq!(k.len(), 2 * radius as usize + 1);
        assert_eq!(k.iter().sum::<u32>(), Q16_ONE);
        assert_eq!(k.first(), k.last());
    }
}

#[test]
fn region_blur_matches_blurring_the_region_alone() {
    let canvas = Canvas::new(12, 9).unwrap();
    let buf: Vec<u8> = (0..canvas.rgba_len()).map(|i| (i * 37 % 251) as u8).collect();

    // Window x 3..9, y 2..7.
    let mut crop = Vec::new();
    for y in 2..7 {
        crop.extend_from_slice(&buf[(y * 12 + 3) * 4..(y * 12 + 9) * 4]);
    }
    let expected = blur_rgba8_premul(&crop, 6, 5, 2, 1.5).unwrap();

    let mut in_place = buf.clone();
    blur_region_in_place(&mut in_place, canvas, Rect::new(3.0, 2.0, 9.0, 7.0), 2, 1.5).unwrap();
    for y in 0..9 {
        for x in 0..12 {
            let at = (y * 12 + x) * 4;
            let got = &in_place[at..at + 4];
            if (3..9).contains(&x) && (2..7).contains(&y) {
                let i = ((y - 2) * 6 + (x - 3)) * 4;
                assert_eq!(got, &expected[i..i + 4], "pixel ({x}, {y})");
            } else {
                assert_eq!(got, &buf[at..at + 4], "pixel ({x}, {y})");
            }
        }
    }
}
