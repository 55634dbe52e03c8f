//! Coverforge composes blog cover images on the CPU.
//!
//! A generated background image and a title go in; a cover comes out at the common
//! social-media sizes. The pipeline for one frame:
//!
//! 1. **Background**: the decoded image (or a flat placeholder), optionally Gaussian-blurred.
//! 2. **Layout**: [`compute_text_layout`] wraps the title and places the block; the same
//!    [`TextLayout`] drives drawing, contrast sampling and hit testing.
//! 3. **Contrast**: the background under the block is averaged and the ink set to black or
//!    white by luminance.
//! 4. **Text**: drop shadow, outline and fill, each rendered as its own layer and
//!    composited over the background.
//! 5. **Overlays**: grid and move affordance, drawn on the display frame only.
//!
//! [`Editor`] owns a session: state, frames, drag interaction and ticketed background
//! loads. Exports rescale the composed frame and hand PNG bytes to a [`DownloadSink`].
//!
//! Pixels are premultiplied RGBA8 end to end and `unsafe` is forbidden.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod effects;
mod export;
mod foundation;
mod generate;
mod interact;
mod layout;
mod render;
mod session;

pub use assets::decode::{ImageRef, PreparedImage, decode_image, load_image_ref};
pub use assets::font::{FontBook, InkMode, Typeface};
pub use composition::model::{
    BACKGROUND_BLUR_MAX_PX, CompositionState, CompositorSettings, POSITION_MAX, POSITION_MIN,
    TEXT_SIZE_SCALE_MAX, TEXT_SIZE_SCALE_MIN,
};
pub use effects::blur::{blur_region_in_place, blur_rgba8_premul, kernel_for_blur_px};
pub use effects::contrast::{
    AverageRgb, ContrastChoice, choose_ink, contrast_for_region, sample_average_rgb,
};
pub use export::png::{ExportedFile, encode_png, export_surface, rescale};
pub use export::share::{PopupSize, SharePlatform, share_url};
pub use export::sink::{DirectorySink, DownloadSink, MemorySink};
pub use export::targets::ExportTarget;
pub use foundation::core::{Canvas, Ink, Point, Position, Rect, Rgba8, Vec2};
pub use foundation::error::{CoverError, CoverResult};
pub use generate::request::{
    BackgroundGenerator, GenerationRequest, GenerationResponse, LogoUpload, MAX_LOGO_BYTES,
    StyleRecommendation, StyleRecommendationRequest, build_prompt, request_background,
};
pub use generate::style::{FontChoice, HexColor, StyleTemplate};
pub use interact::controller::{
    DisplaySize, DragState, InteractionContext, PointerEvent, Transition, drag_target, update,
};
pub use layout::grid::GridModel;
pub use layout::text::{TextLayout, base_font_size, compute_text_layout, wrap_width};
pub use layout::wrap::wrap_text;
pub use render::compositor::{Compositor, Overlays, RenderReport};
pub use render::surface::Surface;
pub use session::editor::{Editor, LoadOutcome, LoadTicket, RenderStatus};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
