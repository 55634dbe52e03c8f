use crate::{
    assets::decode::ImageRef,
    foundation::error::{CoverError, CoverResult},
    generate::style::{FontChoice, HexColor, StyleTemplate},
};

/// Largest accepted logo upload.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Optional logo file attached to a generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the uploader.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Form fields sent to the background generation service.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    /// Article title; required.
    pub title: String,
    /// Optional article summary.
    pub description: String,
    /// Visual style of the background.
    pub style: StyleTemplate,
    /// Font the cover title will use.
    pub font: FontChoice,
    /// Dominant color of the background.
    pub primary_color: HexColor,
    /// Sent as a multipart file part, never as JSON.
    #[serde(skip)]
    pub logo: Option<LogoUpload>,
}

impl GenerationRequest {
    /// Request with `title` and default style, font and color.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Reject an empty title or an oversized logo.
    pub fn validate(&self) -> CoverResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoverError::validation("title must not be empty"));
        }
        if let Some(logo) = &self.logo
            && logo.bytes.len() > MAX_LOGO_BYTES
        {
            return Err(CoverError::validation(format!(
                "logo '{}' is {} bytes, limit is {MAX_LOGO_BYTES}",
                logo.file_name,
                logo.bytes.len()
            )));
        }
        Ok(())
    }
}

/// Text-to-image prompt for a blog cover.
pub fn build_prompt(req: &GenerationRequest) -> String {
    format!(
        "Create a blog cover image for an article titled \"{}\".\n\
         Style: {}\n\
         Color scheme: primarily using {}\n\
         Requirements: professional quality, clean composition, text should be clearly readable",
        req.title.trim(),
        req.style.prompt_fragment(),
        req.primary_color,
    )
}

/// Reply of the generation service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationResponse {
    /// HTTP(S) URL or base64 `data:` URI.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl GenerationResponse {
    /// Parse the service's JSON reply.
    pub fn from_json(body: &str) -> CoverResult<Self> {
        parse_json(body, "generation response")
    }

    /// Classify `image_url` as a data URI or remote URL.
    pub fn image_ref(&self) -> CoverResult<ImageRef> {
        ImageRef::parse(&self.image_url)
    }
}

/// Input of the style recommendation service.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyleRecommendationRequest {
    /// Article title.
    pub title: String,
    /// Optional article summary.
    pub description: String,
}

/// Suggested settings for a title, with a short explanation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecommendation {
    /// Suggested style.
    pub style: StyleTemplate,
    /// Suggested font.
    pub font: FontChoice,
    /// Suggested primary color.
    pub primary_color: HexColor,
    /// Why these settings fit the title.
    pub rationale: String,
}

impl StyleRecommendation {
    /// Parse the recommendation service's JSON reply.
    pub fn from_json(body: &str) -> CoverResult<Self> {
        parse_json(body, "style recommendation")
    }

    /// Copy the recommended style, font and color into `req`.
    pub fn apply_to(&self, req: &mut GenerationRequest) {
        req.style = self.style;
        req.font = self.font;
        req.primary_color = self.primary_color;
    }
}

/// The external text-to-image service.
///
/// Implementations own transport, credentials and retries. Whether a new request should
/// cancel one in flight is left to the host.
pub trait BackgroundGenerator {
    /// Produce a background for `req`.
    fn generate(&mut self, req: &GenerationRequest) -> CoverResult<GenerationResponse>;
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> CoverResult<T> {
    serde_json::from_str(body).map_err(|e| CoverError::serde(format!("{what}: {e}")))
}

/// Validate `req` and hand it to `generator`.
#[tracing::instrument(level = "debug", skip_all, fields(style = req.style.name(), has_logo = req.logo.is_some()))]
pub fn request_background(
    generator: &mut dyn BackgroundGenerator,
    req: &GenerationRequest,
) -> CoverResult<ImageRef> {
    req.validate()?;
    let resp = generator.generate(req)?;
    let image = resp.image_ref()?;
    tracing::debug!(remote = matches!(image, ImageRef::Remote(_)), "background generated");
    Ok(image)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/request.rs"]
mod tests;
