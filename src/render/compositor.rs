use kurbo::Shape as _;

use crate::{
    assets::{
        decode::PreparedImage,
        font::{InkMode, Typeface},
    },
    composition::model::{CompositionState, CompositorSettings},
    effects::{
        blur::{blur_region_in_place, blur_rgba8_premul, kernel_for_blur_px},
        contrast::{ContrastChoice, contrast_for_region},
    },
    foundation::{
        core::{Canvas, Rect, Rgba8},
        error::{CoverError, CoverResult},
    },
    layout::text::{TextLayout, compute_text_layout},
    render::{
        cpu::{bezpath_to_cpu, render_layer},
        surface::Surface,
    },
};

const SHADOW_RGBA: Rgba8 = Rgba8::BLACK;
const SHADOW_ALPHA: f32 = 0.75;
const SHADOW_OFFSET_PX: (i32, i32) = (2, 2);

/// Which interaction overlays are drawn on the display frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    /// 3×3 reference grid (shown while dragging).
    pub grid: bool,
    /// Dashed rectangle around the text block (shown while hovering or dragging).
    pub affordance: bool,
}

/// Everything a render pass derived, kept for hit testing and inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    /// Canvas size of the pass (background size or placeholder).
    pub canvas: Canvas,
    /// Text layout shared by drawing and hit testing.
    pub layout: TextLayout,
    /// Ink and outline picked from the sampled region.
    pub contrast: ContrastChoice,
    /// Whether a background image was drawn (as opposed to the placeholder fill).
    pub has_background: bool,
}

/// Owns the drawing surfaces and paints background, text and overlays.
///
/// Two frames are kept: `composed` (background and text only, used for export) and
/// `display` (composed plus interaction overlays).
#[derive(Debug)]
pub struct Compositor {
    settings: CompositorSettings,
    composed: Surface,
    display: Surface,
}

impl Compositor {
    /// Create a compositor showing the placeholder fill.
    pub fn new(settings: CompositorSettings) -> CoverResult<Self> {
        let mut composed = Surface::new(Canvas::PLACEHOLDER)?;
        composed.fill(settings.placeholder_rgba);
        let display = composed.clone();
        Ok(Self {
            settings,
            composed,
            display,
        })
    }

    /// Active configuration.
    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Pixel size of the current frames.
    pub fn canvas(&self) -> Canvas {
        self.composed.canvas()
    }

    /// Background plus text, without overlays.
    pub fn composed(&self) -> &Surface {
        &self.composed
    }

    /// Composed frame plus the overlays requested by the last render.
    pub fn display(&self) -> &Surface {
        &self.display
    }

    /// Run a full render pass.
    ///
    /// On error both frames keep their previous contents.
    #[tracing::instrument(level = "debug", skip_all, fields(has_background = background.is_some()))]
    pub fn render(
        &mut self,
        background: Option<&PreparedImage>,
        state: &CompositionState,
        typeface: &mut dyn Typeface,
        overlays: Overlays,
    ) -> CoverResult<RenderReport> {
        let state = state.sanitized();
        let canvas = match background {
            Some(img) => img.canvas()?,
            None => Canvas::PLACEHOLDER,
        };

        let mut surface = Surface::new(canvas)?;
        match background {
            Some(img) => {
                let (radius, sigma) = kernel_for_blur_px(state.background_blur_px);
                if radius == 0 {
                    surface.copy_from(&img.rgba8_premul)?;
                } else {
                    let blurred = blur_rgba8_premul(
                        &img.rgba8_premul,
                        img.width,
                        img.height,
                        radius,
                        sigma,
                    )
                    .map_err(|e| CoverError::image_load(format!("blur background: {e}")))?;
                    surface.copy_from(&blurred)?;
                }
            }
            None => surface.fill(self.settings.placeholder_rgba),
        }

        let family = state.font_family.clone();
        let layout = compute_text_layout(&state, canvas, |text, size| {
            typeface.measure(&family, text, size)
        });
        let contrast = contrast_for_region(surface.data(), canvas, layout.hit_rect());

        if !layout.lines.is_empty() {
            let alpha = state.alpha() as f32;

            // Canvas shadow blur lengths are twice the Gaussian sigma.
            let (radius, sigma) = kernel_for_blur_px(layout.shadow_blur_px() / 2.0);
            let mut shadow = render_layer(canvas, |ctx| {
                draw_lines(ctx, typeface, &family, &layout, SHADOW_RGBA, InkMode::Stroke)?;
                draw_lines(ctx, typeface, &family, &layout, SHADOW_RGBA, InkMode::Fill)
            })?;
            let margin = f64::from(radius);
            blur_region_in_place(
                shadow.data_as_u8_slice_mut(),
                canvas,
                layout.hit_rect().inflate(margin, margin),
                radius,
                sigma,
            )?;
            surface.composite(
                shadow.data_as_u8_slice(),
                SHADOW_OFFSET_PX,
                SHADOW_ALPHA * alpha,
            )?;

            // Color intensity applies to the fill only; the outline stays opaque.
            let outline = render_layer(canvas, |ctx| {
                draw_lines(
                    ctx,
                    typeface,
                    &family,
                    &layout,
                    contrast.outline.rgba(),
                    InkMode::Stroke,
                )
            })?;
            surface.composite(outline.data_as_u8_slice(), (0, 0), 1.0)?;
            let fill = render_layer(canvas, |ctx| {
                draw_lines(ctx, typeface, &family, &layout, contrast.ink.rgba(), InkMode::Fill)
            })?;
            surface.composite(fill.data_as_u8_slice(), (0, 0), alpha)?;
        }

        let report = RenderReport {
            canvas,
            layout,
            contrast,
            has_background: background.is_some(),
        };
        let display = self.decorate(&surface, &report, overlays)?;
        self.composed = surface;
        self.display = display;

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            lines = report.layout.lines.len(),
            font_size_px = report.layout.font_size_px,
            ink = ?report.contrast.ink,
            luminance = report.contrast.luminance,
            "render pass complete"
        );
        Ok(report)
    }

    /// Rebuild only the display frame with different overlays.
    pub fn redraw_overlays(&mut self, report: &RenderReport, overlays: Overlays) -> CoverResult<()> {
        self.display = self.decorate(&self.composed, report, overlays)?;
        Ok(())
    }

    fn decorate(
        &self,
        base: &Surface,
        report: &RenderReport,
        overlays: Overlays,
    ) -> CoverResult<Surface> {
        let mut out = base.clone();
        if !overlays.grid && !overlays.affordance {
            return Ok(out);
        }

        let canvas = report.canvas;
        let line_width = (canvas.width_f64() / 600.0).max(1.0);
        let layer = render_layer(canvas, |ctx| {
            if overlays.grid {
                ctx.set_paint(self.settings.grid_line_rgba.to_cpu());
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
                ctx.stroke_path(&bezpath_to_cpu(&grid_path(&self.settings, canvas)));
            }
            if overlays.affordance {
                let dash = line_width * 6.0;
                let dashes = [dash, dash * 0.66];
                let outline = kurbo::dash(report.layout.hit_rect().path_elements(0.1), 0.0, &dashes)
                    .collect::<kurbo::BezPath>();
                ctx.set_paint(self.settings.affordance_rgba.to_cpu());
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width * 2.0));
                ctx.stroke_path(&bezpath_to_cpu(&outline));
            }
            Ok(())
        })?;
        out.composite(layer.data_as_u8_slice(), (0, 0), 1.0)?;
        Ok(out)
    }
}

fn grid_path(settings: &CompositorSettings, canvas: Canvas) -> kurbo::BezPath {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let mut path = kurbo::BezPath::new();
    for fx in settings.grid.interior_columns() {
        path.move_to((fx * w, 0.0));
        path.line_to((fx * w, h));
    }
    for fy in settings.grid.interior_rows() {
        path.move_to((0.0, fy * h));
        path.line_to((w, fy * h));
    }
    path
}

/// Ink every line of `layout` in `color`. Strokes use the outline width.
fn draw_lines(
    ctx: &mut vello_cpu::RenderContext,
    typeface: &mut dyn Typeface,
    family: &str,
    layout: &TextLayout,
    color: Rgba8,
    mode: InkMode,
) -> CoverResult<()> {
    ctx.set_paint(color.to_cpu());
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(layout.outline_width_px()));
    for (idx, line) in layout.lines.iter().enumerate() {
        let origin = layout.line_origin(idx);
        let width = layout.line_widths.get(idx).copied().unwrap_or(0.0);
        let line_box = Rect::new(
            origin.x,
            origin.y,
            origin.x + width,
            origin.y + layout.line_height_px,
        );
        typeface.draw_line(ctx, family, line, layout.font_size_px, line_box, mode)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
