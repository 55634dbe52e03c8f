use std::path::Path;

use crate::{
    assets::{
        decode::{ImageRef, PreparedImage, load_image_ref},
        font::Typeface,
    },
    composition::model::{
        BACKGROUND_BLUR_MAX_PX, CompositionState, CompositorSettings, TEXT_SIZE_SCALE_MAX,
        TEXT_SIZE_SCALE_MIN, clamp_or,
    },
    export::{
        png::{ExportedFile, export_surface},
        sink::DownloadSink,
        targets::ExportTarget,
    },
    foundation::{
        core::{Canvas, Point, Position},
        error::{CoverError, CoverResult},
    },
    interact::controller::{
        DisplaySize, DragState, InteractionContext, PointerEvent, drag_target, update,
    },
    layout::text::TextLayout,
    render::{
        compositor::{Compositor, Overlays, RenderReport},
        surface::Surface,
    },
};

/// Lifecycle of the editor's frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    /// No background yet; the placeholder is shown.
    Empty,
    /// A background load is outstanding.
    Loading {
        /// Generation of the outstanding load.
        generation: u64,
    },
    /// The current background is rendered.
    Ready,
    /// Rendering failed; nothing is redrawn until a new background load starts.
    Failed {
        /// Rendered error that caused the failure.
        message: String,
    },
}

/// Handed out by [`Editor::begin_background_load`]; only the newest ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Load generation this ticket belongs to.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What [`Editor::complete_background_load`] did with a finished load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image became the background and adjustments were reset.
    Applied,
    /// A newer load was started after this one; the result was dropped.
    Stale,
    /// Loading or rendering failed; see [`Editor::status`].
    Failed,
}

/// Single owner of one cover editing session.
///
/// Holds the composition state, the compositor and its frames, the drag state and the
/// background load generation. Every mutation goes through a method that re-renders.
pub struct Editor {
    state: CompositionState,
    compositor: Compositor,
    typeface: Box<dyn Typeface>,
    drag: DragState,
    display: Option<DisplaySize>,
    background: Option<PreparedImage>,
    generation: u64,
    status: RenderStatus,
    report: Option<RenderReport>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("generation", &self.generation)
            .field("status", &self.status)
            .field("canvas", &self.canvas())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Start a session showing the placeholder.
    pub fn new(typeface: Box<dyn Typeface>, settings: CompositorSettings) -> CoverResult<Self> {
        let mut editor = Self {
            state: CompositionState::default(),
            compositor: Compositor::new(settings)?,
            typeface,
            drag: DragState::Idle,
            display: None,
            background: None,
            generation: 0,
            status: RenderStatus::Empty,
            report: None,
        };
        editor.render()?;
        Ok(editor)
    }

    /// Current composition state.
    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    /// Current render lifecycle status.
    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    /// Current pointer interaction state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pixel size of the current frames.
    pub fn canvas(&self) -> Canvas {
        self.compositor.canvas()
    }

    /// Whether a background image has been applied.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Layout of the frame on screen, shared with hit testing.
    pub fn layout(&self) -> Option<&TextLayout> {
        self.report.as_ref().map(|r| &r.layout)
    }

    /// Report of the last successful render pass.
    pub fn last_report(&self) -> Option<&RenderReport> {
        self.report.as_ref()
    }

    /// Frame used for export: background and text only.
    pub fn composed_frame(&self) -> &Surface {
        self.compositor.composed()
    }

    /// Frame for on-screen display, including interaction overlays.
    pub fn display_frame(&self) -> &Surface {
        self.compositor.display()
    }

    /// Replace the title text.
    pub fn set_text(&mut self, text: impl Into<String>) -> CoverResult<()> {
        let text = text.into();
        self.edit(|s| s.text_value = text)
    }

    /// Request a different font family.
    pub fn set_font_family(&mut self, family: impl Into<String>) -> CoverResult<()> {
        let family = family.into();
        self.edit(|s| s.font_family = family)
    }

    /// Set the font size multiplier, clamped to `[0.5, 2]`.
    pub fn set_text_size_scale(&mut self, scale: f64) -> CoverResult<()> {
        self.edit(|s| {
            s.text_size_scale = clamp_or(scale, TEXT_SIZE_SCALE_MIN, TEXT_SIZE_SCALE_MAX, 1.0);
        })
    }

    /// Set the text alpha, clamped to `[0, 1]`.
    pub fn set_color_intensity(&mut self, intensity: f64) -> CoverResult<()> {
        self.edit(|s| s.color_intensity = clamp_or(intensity, 0.0, 1.0, 1.0))
    }

    /// Set the background blur radius, clamped to `[0, 20]` pixels.
    pub fn set_background_blur_px(&mut self, blur_px: f64) -> CoverResult<()> {
        self.edit(|s| s.background_blur_px = clamp_or(blur_px, 0.0, BACKGROUND_BLUR_MAX_PX, 0.0))
    }

    /// Move the text as a drag release at `position` would: snapped or clamped.
    pub fn set_text_position(&mut self, position: Position) -> CoverResult<()> {
        let position = drag_target(&self.compositor.settings().grid, position);
        self.edit(|s| s.text_position = position)
    }

    /// Replace the whole state, clamping every field.
    pub fn apply_state(&mut self, state: CompositionState) -> CoverResult<()> {
        let mut state = state.sanitized();
        state.text_position = drag_target(&self.compositor.settings().grid, state.text_position);
        self.edit(|s| *s = state)
    }

    /// Apply `change` and re-render; the previous state is restored if the render fails.
    fn edit(&mut self, change: impl FnOnce(&mut CompositionState)) -> CoverResult<()> {
        let previous = self.state.clone();
        change(&mut self.state);
        if let Err(err) = self.render() {
            self.state = previous;
            return Err(err);
        }
        Ok(())
    }

    /// On-screen size of the canvas; pointer events are scaled by `canvas / display`.
    /// Until set, the display is assumed to match the canvas.
    pub fn set_display_size(&mut self, display: DisplaySize) {
        self.display = Some(display);
    }

    /// Start loading a new background. Completions of earlier tickets become stale.
    pub fn begin_background_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = RenderStatus::Loading {
            generation: self.generation,
        };
        tracing::debug!(generation = self.generation, "background load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish the load started with `ticket`.
    pub fn complete_background_load(
        &mut self,
        ticket: LoadTicket,
        result: CoverResult<PreparedImage>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale background load"
            );
            return LoadOutcome::Stale;
        }

        let image = match result {
            Ok(image) => image,
            Err(err) => {
                self.fail(&err);
                return LoadOutcome::Failed;
            }
        };

        tracing::info!(
            generation = ticket.generation,
            width = image.width,
            height = image.height,
            "background applied"
        );
        self.background = Some(image);
        self.state.reset_adjustments();
        self.drag = DragState::Idle;
        self.status = RenderStatus::Ready;
        match self.render() {
            Ok(()) => LoadOutcome::Applied,
            Err(err) => {
                // The frames still show the previous background.
                if !matches!(self.status, RenderStatus::Failed { .. }) {
                    self.fail(&err);
                }
                LoadOutcome::Failed
            }
        }
    }

    /// Resolve and decode `image_ref` synchronously as one ticketed load.
    pub fn load_background(&mut self, image_ref: &ImageRef, root: &Path) -> LoadOutcome {
        let ticket = self.begin_background_load();
        let result = load_image_ref(image_ref, root);
        self.complete_background_load(ticket, result)
    }

    /// Pointer pressed at display coordinates `p`; returns whether the display changed.
    pub fn pointer_down(&mut self, p: Point) -> CoverResult<bool> {
        self.pointer(PointerEvent::Down(p))
    }

    /// Pointer moved to display coordinates `p`; returns whether the display changed.
    pub fn pointer_move(&mut self, p: Point) -> CoverResult<bool> {
        self.pointer(PointerEvent::Move(p))
    }

    /// Pointer released; returns whether the display changed.
    pub fn pointer_up(&mut self) -> CoverResult<bool> {
        self.pointer(PointerEvent::Up)
    }

    /// Pointer left the canvas; returns whether the display changed.
    pub fn pointer_leave(&mut self) -> CoverResult<bool> {
        self.pointer(PointerEvent::Leave)
    }

    /// Feed one pointer event; returns whether the display frame changed.
    fn pointer(&mut self, event: PointerEvent) -> CoverResult<bool> {
        let Some(report) = &self.report else {
            return Ok(false);
        };
        let canvas = report.canvas;
        let ctx = InteractionContext {
            canvas,
            display: self.display.unwrap_or_else(|| DisplaySize::of_canvas(canvas)),
            layout: &report.layout,
            grid: &self.compositor.settings().grid,
        };
        let transition = update(self.drag, event, &ctx);

        let drag_changed = transition.state != self.drag;
        self.drag = transition.state;
        match transition.position {
            Some(p) if p != self.state.text_position => {
                self.edit(|s| s.text_position = p)?;
                Ok(true)
            }
            _ if drag_changed => {
                tracing::trace!(state = ?self.drag, "drag state changed");
                let overlays = self.overlays();
                if let Some(report) = &self.report {
                    self.compositor.redraw_overlays(report, overlays)?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn overlays(&self) -> Overlays {
        Overlays {
            grid: self.drag.shows_grid(),
            affordance: self.drag.shows_affordance(),
        }
    }

    /// Re-render both frames from the current state.
    ///
    /// A failed session stays failed until the next background load begins.
    pub fn render(&mut self) -> CoverResult<()> {
        if let RenderStatus::Failed { message } = &self.status {
            return Err(CoverError::validation(format!(
                "editor is in a failed state: {message}"
            )));
        }
        let overlays = self.overlays();
        match self.compositor.render(
            self.background.as_ref(),
            &self.state,
            self.typeface.as_mut(),
            overlays,
        ) {
            Ok(report) => {
                self.report = Some(report);
                Ok(())
            }
            Err(err) => {
                if err.is_terminal_render_failure() {
                    self.fail(&err);
                } else {
                    tracing::warn!(%err, "render failed");
                }
                Err(err)
            }
        }
    }

    fn fail(&mut self, err: &CoverError) {
        tracing::error!(%err, "render failed");
        self.status = RenderStatus::Failed {
            message: err.to_string(),
        };
        self.report = None;
        self.drag = DragState::Idle;
    }

    /// Export the composed frame at `target` size and deliver it to `sink`.
    ///
    /// Never touches the composition state; a failed export can be retried.
    #[tracing::instrument(level = "info", skip_all, fields(label = target.label))]
    pub fn export(
        &self,
        target: ExportTarget,
        sink: &mut dyn DownloadSink,
    ) -> CoverResult<ExportedFile> {
        if let RenderStatus::Failed { message } = &self.status {
            return Err(CoverError::export(format!("no frame to export: {message}")));
        }
        let file = export_surface(self.compositor.composed(), target)?;
        sink.deliver(&file).map_err(|e| match e {
            CoverError::Export(_) => e,
            other => CoverError::export(other.to_string()),
        })?;
        Ok(file)
    }

    /// Export every catalog target; stops at the first failure.
    pub fn export_all(&self, sink: &mut dyn DownloadSink) -> CoverResult<Vec<ExportedFile>> {
        ExportTarget::catalog()
            .iter()
            .map(|&target| self.export(target, sink))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
