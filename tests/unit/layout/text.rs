use super::*;
use crate::foundation::core::Position;

fn half_em(s: &str, size: f64) -> f64 {
    s.chars().count() as f64 * size * 0.5
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn hello_world_on_twitter_canvas() {
    let state = CompositionState::new("Hello World", "inter");
    let canvas = Canvas::new(1200, 675).unwrap();
    let layout = compute_text_layout(&state, canvas, half_em);

    assert!(approx(wrap_width(canvas), 480.0));
    assert_eq!(layout.lines, vec!["Hello World".to_string()]);
    assert!(approx(layout.font_size_px, 72.0));
    assert!(approx(layout.line_height_px, 86.4));
    assert!(approx(layout.block_height_px, 86.4));
    assert_eq!(layout.anchor, Point::new(600.0, 337.5));
    assert!(approx(layout.top(), 337.5 - 43.2));

    let r = layout.block_rect();
    assert!(approx(r.center().x, 600.0));
    assert!(approx(r.center().y, 337.5));
}

#[test]
fn font_size_uses_height_bound_on_wide_canvas() {
    let canvas = Canvas::new(2000, 400).unwrap();
    assert!(approx(base_font_size(canvas, 1.0), 48.0));
    assert!(approx(base_font_size(canvas, 2.0), 96.0));
}

#[test]
fn out_of_range_scale_is_clamped_before_layout() {
    let mut state = CompositionState::new("Hi", "inter");
    state.text_size_scale = 10.0;
    let layout = compute_text_layout(&state, Canvas::PLACEHOLDER, half_em);
    assert!(approx(layout.font_size_px, 144.0));
}

#[test]
fn long_title_stacks_into_column() {
    let state = CompositionState::new(
        "Building reliable cover generators with a small Rust compositor",
        "inter",
    );
    let layout = compute_text_layout(&state, Canvas::PLACEHOLDER, half_em);
    assert!(layout.lines.len() > 2);
    for (line, w) in layout.lines.iter().zip(&layout.line_widths) {
        if line.contains(' ') {
            assert!(*w < wrap_width(Canvas::PLACEHOLDER));
        }
    }
    assert!(approx(
        layout.block_height_px,
        layout.line_height_px * layout.lines.len() as f64
    ));
}

#[test]
fn hit_rect_is_padded_by_half_font_size() {
    let state = CompositionState::new("Hello World", "inter");
    let layout = compute_text_layout(&state, Canvas::PLACEHOLDER, half_em);
    let block = layout.block_rect();
    let hit = layout.hit_rect();
    assert!(approx(block.x0 - hit.x0, 36.0));
    assert!(approx(hit.y1 - block.y1, 36.0));

    assert!(layout.contains(Point::new(600.0, 337.5)));
    assert!(layout.contains(Point::new(hit.x0 + 1.0, hit.y0 + 1.0)));
    assert!(!layout.contains(Point::new(hit.x0 - 1.0, 337.5)));
}

#[test]
fn lines_are_centered_on_anchor() {
    let mut state = CompositionState::new("aaaa bb", "inter");
    state.text_position = Position::new(0.25, 0.5);
    let layout = compute_text_layout(&state, Canvas::new(1000, 1000).unwrap(), |s, _| {
        s.chars().count() as f64 * 100.0
    });
    assert_eq!(layout.lines, vec!["aaaa", "bb"]);
    assert_eq!(layout.line_origin(0).x, 250.0 - 200.0);
    assert_eq!(layout.line_origin(1).x, 250.0 - 100.0);
    assert!(approx(
        layout.line_origin(1).y - layout.line_origin(0).y,
        layout.line_height_px
    ));
}

#[test]
fn derived_stroke_and_shadow_sizes() {
    let state = CompositionState::new("x", "inter");
    let layout = compute_text_layout(&state, Canvas::PLACEHOLDER, half_em);
    assert!(approx(layout.outline_width_px(), 72.0 * 0.08));
    assert!(approx(layout.shadow_blur_px(), 72.0 * 0.15));
}
