use crate::{
    composition::model::CompositionState,
    foundation::core::{Canvas, Point, Rect},
    layout::wrap::wrap_text,
};

const FONT_SIZE_WIDTH_FACTOR: f64 = 0.06;
const FONT_SIZE_HEIGHT_FACTOR: f64 = 0.12;
const WRAP_WIDTH_FACTOR: f64 = 0.4;
const LINE_HEIGHT_FACTOR: f64 = 1.2;
const PADDING_FACTOR: f64 = 0.5;
const OUTLINE_WIDTH_FACTOR: f64 = 0.08;
const SHADOW_BLUR_FACTOR: f64 = 0.15;

/// Geometry of the wrapped title block for one render.
///
/// Derived, never stored across state changes: built by [`compute_text_layout`] and shared
/// by drawing and hit testing so both always agree.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Measured width of each line at `font_size_px`.
    pub line_widths: Vec<f64>,
    /// Font size after applying the size scale.
    pub font_size_px: f64,
    /// Distance between baselines, `1.2 × font_size_px`.
    pub line_height_px: f64,
    /// Widest line.
    pub block_width_px: f64,
    /// `line_height_px * lines.len()`.
    pub block_height_px: f64,
    /// Pixel anchor: the block is centered horizontally and vertically on this point.
    pub anchor: Point,
}

impl TextLayout {
    /// Top edge of the block.
    pub fn top(&self) -> f64 {
        self.anchor.y - self.block_height_px / 2.0
    }

    /// Unpadded bounding box of the text block.
    pub fn block_rect(&self) -> Rect {
        let half_w = self.block_width_px / 2.0;
        let top = self.top();
        Rect::new(
            self.anchor.x - half_w,
            top,
            self.anchor.x + half_w,
            top + self.block_height_px,
        )
    }

    /// Padding around the block used for hit testing, sampling and the move affordance.
    pub fn padding_px(&self) -> f64 {
        self.font_size_px * PADDING_FACTOR
    }

    /// Padded bounding box.
    pub fn hit_rect(&self) -> Rect {
        let pad = self.padding_px();
        self.block_rect().inflate(pad, pad)
    }

    /// Whether canvas point `p` is inside the hit rect.
    pub fn contains(&self, p: Point) -> bool {
        let r = self.hit_rect();
        p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
    }

    /// Top-left corner of the box of line `idx`, which is centered on the anchor.
    pub fn line_origin(&self, idx: usize) -> Point {
        let w = self.line_widths.get(idx).copied().unwrap_or(0.0);
        Point::new(
            self.anchor.x - w / 2.0,
            self.top() + self.line_height_px * idx as f64,
        )
    }

    /// Outline stroke width: `0.08 × font_size_px`.
    pub fn outline_width_px(&self) -> f64 {
        self.font_size_px * OUTLINE_WIDTH_FACTOR
    }

    /// Shadow blur length: `0.15 × font_size_px`.
    pub fn shadow_blur_px(&self) -> f64 {
        self.font_size_px * SHADOW_BLUR_FACTOR
    }
}

/// Base font size for `canvas` before wrapping: `min(w*0.06, h*0.12) * scale`.
pub fn base_font_size(canvas: Canvas, text_size_scale: f64) -> f64 {
    (canvas.width_f64() * FONT_SIZE_WIDTH_FACTOR).min(canvas.height_f64() * FONT_SIZE_HEIGHT_FACTOR)
        * text_size_scale
}

/// Maximum line width for wrapping: a column of 40% of the canvas width.
pub fn wrap_width(canvas: Canvas) -> f64 {
    canvas.width_f64() * WRAP_WIDTH_FACTOR
}

/// Lay out `state.text_value` on `canvas`.
///
/// `measure(text, font_size_px)` returns the advance width of a single line of text.
pub fn compute_text_layout<M>(state: &CompositionState, canvas: Canvas, mut measure: M) -> TextLayout
where
    M: FnMut(&str, f64) -> f64,
{
    let state = state.sanitized();
    let font_size_px = base_font_size(canvas, state.text_size_scale);
    let lines = wrap_text(
        |s| measure(s, font_size_px),
        &state.text_value,
        wrap_width(canvas),
    );
    let line_widths: Vec<f64> = lines.iter().map(|l| measure(l, font_size_px)).collect();
    let block_width_px = line_widths.iter().copied().fold(0.0, f64::max);
    let line_height_px = font_size_px * LINE_HEIGHT_FACTOR;
    let block_height_px = line_height_px * lines.len() as f64;

    TextLayout {
        lines,
        line_widths,
        font_size_px,
        line_height_px,
        block_width_px,
        block_height_px,
        anchor: state.text_position.to_canvas(canvas),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
