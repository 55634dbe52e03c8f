/// Convenience result type used across coverforge.
pub type CoverResult<T> = Result<T, CoverError>;

/// Top-level error taxonomy used by compositor, editor and export APIs.
///
/// None of these errors corrupt or require resetting the composition state; they are local
/// to the render or export attempt that produced them.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// The drawing surface could not be created (zero-sized or oversized canvas).
    #[error("canvas init error: {0}")]
    CanvasInit(String),

    /// The background image could not be fetched or decoded.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// Rescaling, encoding or delivering an export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A JSON document (such as a service reply) could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::CanvasInit`] value.
    pub fn canvas_init(msg: impl Into<String>) -> Self {
        Self::CanvasInit(msg.into())
    }

    /// Build a [`CoverError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`CoverError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error ends the current render pass for good (no retry path).
    pub fn is_terminal_render_failure(&self) -> bool {
        matches!(self, Self::CanvasInit(_) | Self::ImageLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
