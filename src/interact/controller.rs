use crate::{
    composition::model::{POSITION_MAX, POSITION_MIN},
    foundation::core::{Canvas, Point, Position},
    layout::{grid::GridModel, text::TextLayout},
};

/// Pointer interaction state of the text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// Pointer away from the text.
    #[default]
    Idle,
    /// Pointer is over the text block, no button held.
    Hovering,
    /// Button went down on the text block and is still held.
    Dragging,
}

impl DragState {
    /// Whether the grid overlay should be visible.
    pub fn shows_grid(self) -> bool {
        self == Self::Dragging
    }

    /// Whether the dashed move affordance should be visible.
    pub fn shows_affordance(self) -> bool {
        self != Self::Idle
    }
}

/// On-screen size of the displayed canvas, in the host's display units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplaySize {
    /// Displayed width in CSS pixels.
    pub width: f64,
    /// Displayed height in CSS pixels.
    pub height: f64,
}

impl DisplaySize {
    /// Display of `width`×`height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Display size equal to the canvas pixel size (scale 1).
    pub fn of_canvas(canvas: Canvas) -> Self {
        Self::new(canvas.width_f64(), canvas.height_f64())
    }

    /// Canvas pixels per display unit on each axis. Degenerate display sizes map 1:1.
    pub fn scale_to(self, canvas: Canvas) -> (f64, f64) {
        fn axis(canvas_px: f64, display: f64) -> f64 {
            if display.is_finite() && display > 0.0 {
                canvas_px / display
            } else {
                1.0
            }
        }
        (
            axis(canvas.width_f64(), self.width),
            axis(canvas.height_f64(), self.height),
        )
    }
}

/// A single-pointer event in display coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at a display point.
    Down(Point),
    /// Pointer moved to a display point.
    Move(Point),
    /// Button released.
    Up,
    /// Pointer left the canvas.
    Leave,
}

/// Everything the controller reads besides its own state.
#[derive(Clone, Copy, Debug)]
pub struct InteractionContext<'a> {
    /// Pixel size of the frame.
    pub canvas: Canvas,
    /// Size the frame is shown at.
    pub display: DisplaySize,
    /// Layout of the frame currently on screen.
    pub layout: &'a TextLayout,
    /// Snap grid.
    pub grid: &'a GridModel,
}

impl InteractionContext<'_> {
    /// Convert a display-space point into canvas pixels.
    pub fn to_canvas_px(&self, p: Point) -> Point {
        let (sx, sy) = self.display.scale_to(self.canvas);
        Point::new(p.x * sx, p.y * sy)
    }

    /// Convert a display-space point into normalized canvas coordinates.
    pub fn to_normalized(&self, p: Point) -> Position {
        let px = self.to_canvas_px(p);
        Position::new(
            px.x / self.canvas.width_f64(),
            px.y / self.canvas.height_f64(),
        )
    }
}

/// Result of feeding one event to [`update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: DragState,
    /// New text position, when the event moved the text.
    pub position: Option<Position>,
}

impl Transition {
    fn to(state: DragState) -> Self {
        Self {
            state,
            position: None,
        }
    }
}

/// Position the text block takes when dragged to `p`: the grid point if one is within
/// the snap threshold, else `p` clamped to the free-placement range.
pub fn drag_target(grid: &GridModel, p: Position) -> Position {
    grid.snap(p)
        .unwrap_or_else(|| p.clamped(POSITION_MIN, POSITION_MAX))
}

/// Drag state machine.
///
/// | state    | Down(hit) | Down(miss) | Move            | Up / Leave |
/// |----------|-----------|------------|-----------------|------------|
/// | Idle     | Dragging  | Idle       | Hovering if hit | Idle       |
/// | Hovering | Dragging  | Idle       | Idle if miss    | Idle       |
/// | Dragging | Dragging  | Dragging   | moves the text  | Idle       |
pub fn update(state: DragState, event: PointerEvent, ctx: &InteractionContext<'_>) -> Transition {
    match (state, event) {
        (_, PointerEvent::Up | PointerEvent::Leave) => Transition::to(DragState::Idle),
        (DragState::Dragging, PointerEvent::Down(_)) => Transition::to(DragState::Dragging),
        (_, PointerEvent::Down(p)) => {
            if ctx.layout.contains(ctx.to_canvas_px(p)) {
                Transition::to(DragState::Dragging)
            } else {
                Transition::to(DragState::Idle)
            }
        }
        (DragState::Dragging, PointerEvent::Move(p)) => Transition {
            state: DragState::Dragging,
            position: Some(drag_target(ctx.grid, ctx.to_normalized(p))),
        },
        (_, PointerEvent::Move(p)) => {
            if ctx.layout.contains(ctx.to_canvas_px(p)) {
                Transition::to(DragState::Hovering)
            } else {
                Transition::to(DragState::Idle)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/controller.rs"]
mod tests;
