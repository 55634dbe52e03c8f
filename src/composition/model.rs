use crate::{
    foundation::core::{Position, Rgba8},
    layout::grid::GridModel,
};

/// Smallest accepted text size multiplier.
pub const TEXT_SIZE_SCALE_MIN: f64 = 0.5;
/// Largest accepted text size multiplier.
pub const TEXT_SIZE_SCALE_MAX: f64 = 2.0;
/// Largest accepted background blur radius in pixels.
pub const BACKGROUND_BLUR_MAX_PX: f64 = 20.0;
/// Free (non-snapped) positions are kept inside `[POSITION_MIN, POSITION_MAX]` on both axes.
pub const POSITION_MIN: f64 = 0.1;
/// See [`POSITION_MIN`].
pub const POSITION_MAX: f64 = 0.9;

/// User-adjustable text rendering parameters applied on top of one background image.
///
/// Mutated only through [`crate::Editor`] setters and drag interaction. The adjustable
/// fields are reset whenever a new background is applied; text and font are kept.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionState {
    /// Title text drawn over the background.
    pub text_value: String,
    /// Requested font family (resolved by the active [`crate::Typeface`]).
    pub font_family: String,
    /// Font size multiplier in `[0.5, 2]`.
    pub text_size_scale: f64,
    /// Normalized anchor of the text block center.
    pub text_position: Position,
    /// Text alpha; clamped to `[0, 1]` before use.
    pub color_intensity: f64,
    /// Background blur radius in pixels, `[0, 20]`.
    pub background_blur_px: f64,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self {
            text_value: String::new(),
            font_family: "inter".to_string(),
            text_size_scale: 1.0,
            text_position: Position::CENTER,
            color_intensity: 1.0,
            background_blur_px: 0.0,
        }
    }
}

impl CompositionState {
    /// State with the given title and font and default adjustments.
    pub fn new(text_value: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            text_value: text_value.into(),
            font_family: font_family.into(),
            ..Self::default()
        }
    }

    /// Restore size, position, intensity and blur to their defaults.
    pub fn reset_adjustments(&mut self) {
        let defaults = Self::default();
        self.text_size_scale = defaults.text_size_scale;
        self.text_position = defaults.text_position;
        self.color_intensity = defaults.color_intensity;
        self.background_blur_px = defaults.background_blur_px;
    }

    /// Copy with every numeric field forced into its valid range.
    ///
    /// Positions are clamped to `[0, 1]` only: grid-snapped positions may sit on the outer
    /// edge of the canvas.
    pub fn sanitized(&self) -> Self {
        Self {
            text_value: self.text_value.clone(),
            font_family: self.font_family.clone(),
            text_size_scale: clamp_or(
                self.text_size_scale,
                TEXT_SIZE_SCALE_MIN,
                TEXT_SIZE_SCALE_MAX,
                1.0,
            ),
            text_position: self.text_position.clamped(0.0, 1.0),
            color_intensity: self.alpha(),
            background_blur_px: clamp_or(self.background_blur_px, 0.0, BACKGROUND_BLUR_MAX_PX, 0.0),
        }
    }

    /// Color intensity as a usable alpha in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        clamp_or(self.color_intensity, 0.0, 1.0, 1.0)
    }
}

pub(crate) fn clamp_or(v: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.clamp(min, max) } else { fallback }
}

/// Compositor configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Flat fill used when no background image is available.
    pub placeholder_rgba: Rgba8,
    /// Grid used for drag snapping and the drag overlay.
    pub grid: GridModel,
    /// Stroke color of grid lines shown while dragging.
    pub grid_line_rgba: Rgba8,
    /// Stroke color of the dashed move-affordance rectangle.
    pub affordance_rgba: Rgba8,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            placeholder_rgba: Rgba8::opaque(0xe5, 0xe7, 0xeb),
            grid: GridModel::default(),
            grid_line_rgba: Rgba8::new(255, 255, 255, 128),
            affordance_rgba: Rgba8::new(255, 255, 255, 204),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
