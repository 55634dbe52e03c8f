use std::sync::Arc;

use super::*;
use crate::{
    foundation::core::{Ink, Point, Position},
    test_support::BlockTypeface,
};

fn flat_image(width: u32, height: u32, color: Rgba8) -> PreparedImage {
    let px = color.to_premul();
    let mut bytes = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        bytes.extend_from_slice(&px);
    }
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(bytes),
    }
}

fn compositor() -> Compositor {
    Compositor::new(CompositorSettings::default()).unwrap()
}

#[test]
fn new_compositor_shows_placeholder() {
    let c = compositor();
    assert_eq!(c.canvas(), Canvas::PLACEHOLDER);
    let placeholder = CompositorSettings::default().placeholder_rgba.to_premul();
    assert_eq!(c.composed().pixel(0, 0), Some(placeholder));
    assert_eq!(c.display().pixel(1199, 674), Some(placeholder));
}

#[test]
fn empty_text_draws_only_the_background() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let report = c
        .render(None, &CompositionState::default(), &mut tf, Overlays::default())
        .unwrap();

    assert!(report.layout.lines.is_empty());
    assert!(!report.has_background);
    assert!(tf.drawn_lines.is_empty());
    assert_eq!(tf.measured, 0);
    let placeholder = c.settings().placeholder_rgba.to_premul();
    assert!(c.composed().data().chunks_exact(4).all(|px| px == placeholder));
}

#[test]
fn hello_world_on_placeholder_is_one_centered_black_line() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let state = CompositionState::new("Hello World", "inter");
    let report = c.render(None, &state, &mut tf, Overlays::default()).unwrap();

    let layout = &report.layout;
    assert_eq!(layout.lines, vec!["Hello World".to_string()]);
    assert!((layout.font_size_px - 72.0).abs() < 1e-9);
    assert!((layout.block_height_px - 86.4).abs() < 1e-9);
    assert_eq!(layout.anchor, Point::new(600.0, 337.5));
    assert_eq!(report.contrast.ink, Ink::Black);
    assert_eq!(report.contrast.outline, Ink::White);

    // Interior of the first glyph block.
    assert_eq!(c.composed().pixel(420, 337), Some([0, 0, 0, 255]));
    // Far from the text nothing changed.
    let placeholder = c.settings().placeholder_rgba.to_premul();
    assert_eq!(c.composed().pixel(50, 50), Some(placeholder));
    assert_eq!(tf.drawn_lines, vec!["Hello World".to_string(); 2]);
}

#[test]
fn dark_background_gets_white_ink() {
    let mut c = compositor();
    let bg = flat_image(400, 200, Rgba8::opaque(30, 30, 30));
    let mut tf = BlockTypeface::default();
    let state = CompositionState::new("Hi", "inter");
    let report = c.render(Some(&bg), &state, &mut tf, Overlays::default()).unwrap();

    assert_eq!(report.canvas, Canvas::new(400, 200).unwrap());
    assert!(report.has_background);
    assert_eq!(report.contrast.ink, Ink::White);
    assert!(report.contrast.luminance < 0.5);
    // font 24, first glyph block spans x 190.4..197.6, y 91.6..108.4
    assert_eq!(c.composed().pixel(194, 100), Some([255, 255, 255, 255]));
}

#[test]
fn background_blur_does_not_soften_text() {
    let mut bytes = Vec::new();
    for _y in 0..200u32 {
        for x in 0..400u32 {
            let px = if x < 20 {
                Rgba8::WHITE.to_premul()
            } else {
                Rgba8::opaque(30, 30, 30).to_premul()
            };
            bytes.extend_from_slice(&px);
        }
    }
    let bg = PreparedImage {
        width: 400,
        height: 200,
        rgba8_premul: Arc::new(bytes),
    };

    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let mut state = CompositionState::new("Hi", "inter");
    state.background_blur_px = 4.0;
    c.render(Some(&bg), &state, &mut tf, Overlays::default()).unwrap();

    let edge = c.composed().pixel(20, 100).unwrap();
    assert!(edge[0] > 30 && edge[0] < 255, "edge not blended: {edge:?}");
    assert_eq!(c.composed().pixel(194, 100), Some([255, 255, 255, 255]));
}

#[test]
fn color_intensity_fades_text() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let mut state = CompositionState::new("Hello World", "inter");
    state.color_intensity = 0.5;
    c.render(None, &state, &mut tf, Overlays::default()).unwrap();

    let px = c.composed().pixel(420, 337).unwrap();
    assert_ne!(px, [0, 0, 0, 255]);
    assert_ne!(px, c.settings().placeholder_rgba.to_premul());
}

#[test]
fn color_intensity_leaves_the_outline_opaque() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let mut state = CompositionState::new("Hello World", "inter");
    state.color_intensity = 0.0;
    c.render(None, &state, &mut tf, Overlays::default()).unwrap();

    // First glyph block is x 409.2..430.8; its 5.76px outline covers x 406.32..412.08.
    assert_eq!(c.composed().pixel(407, 337), Some([255, 255, 255, 255]));
    // The fill, and the shadow with it, is fully transparent.
    let placeholder = c.settings().placeholder_rgba.to_premul();
    assert_eq!(c.composed().pixel(420, 337), Some(placeholder));
}

#[test]
fn overlays_touch_only_the_display_frame() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let state = CompositionState::new("Hello World", "inter");
    let overlays = Overlays {
        grid: true,
        affordance: true,
    };
    let report = c.render(None, &state, &mut tf, overlays).unwrap();

    let placeholder = c.settings().placeholder_rgba.to_premul();
    assert_eq!(c.composed().pixel(400, 50), Some(placeholder));
    assert_ne!(c.display().pixel(400, 50), Some(placeholder));

    c.redraw_overlays(&report, Overlays::default()).unwrap();
    assert_eq!(c.display().data(), c.composed().data());
}

#[test]
fn snapped_edge_position_still_renders() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    let mut state = CompositionState::new("Corner", "inter");
    state.text_position = Position::new(0.0, 1.0);
    let report = c.render(None, &state, &mut tf, Overlays::default()).unwrap();
    assert_eq!(report.layout.anchor, Point::new(0.0, 675.0));
}

#[test]
fn failed_render_keeps_previous_frames() {
    let mut c = compositor();
    let mut tf = BlockTypeface::default();
    c.render(None, &CompositionState::new("Keep", "inter"), &mut tf, Overlays::default())
        .unwrap();
    let before = c.composed().data().to_vec();

    let broken = PreparedImage {
        width: 10,
        height: 10,
        rgba8_premul: Arc::new(vec![0; 4]),
    };
    let err = c
        .render(Some(&broken), &CompositionState::default(), &mut tf, Overlays::default())
        .unwrap_err();
    assert!(err.is_terminal_render_failure());
    assert_eq!(c.composed().data(), before.as_slice());
    assert_eq!(c.canvas(), Canvas::PLACEHOLDER);
}
