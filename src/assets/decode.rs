use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::{
    core::Canvas,
    error::{CoverError, CoverResult},
    math::premultiply_in_place,
};

/// Decoded background image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Natural size as a canvas size.
    pub fn canvas(&self) -> CoverResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CoverResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CoverError::image_load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Where an `imageUrl` returned by the generation service points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageRef {
    /// Inline `data:<mime>;base64,<payload>` URI.
    DataUri {
        /// Declared media type, e.g. `image/jpeg`.
        mime: String,
        /// Decoded payload bytes.
        bytes: Vec<u8>,
    },
    /// `http(s)://` URL; the host has to fetch it.
    Remote(String),
    /// Local file (`file://` URL or plain path).
    File(PathBuf),
}

impl ImageRef {
    /// Classify an image URL string.
    pub fn parse(image_url: &str) -> CoverResult<Self> {
        let s = image_url.trim();
        if s.is_empty() {
            return Err(CoverError::image_load("image url is empty"));
        }
        if let Some(rest) = s.strip_prefix("data:") {
            return parse_data_uri(rest);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Remote(s.to_string()));
        }
        if let Some(path) = s.strip_prefix("file://") {
            return Ok(Self::File(PathBuf::from(path)));
        }
        Ok(Self::File(PathBuf::from(s)))
    }
}

fn parse_data_uri(rest: &str) -> CoverResult<ImageRef> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoverError::image_load("data uri has no ',' separator"))?;
    let Some(mime) = meta.strip_suffix(";base64") else {
        return Err(CoverError::image_load(
            "only base64-encoded data uris are supported",
        ));
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CoverError::image_load(format!("invalid base64 payload: {e}")))?;
    Ok(ImageRef::DataUri {
        mime: mime.to_string(),
        bytes,
    })
}

/// Resolve and decode an image reference. Relative paths are joined onto `root`.
pub fn load_image_ref(image_ref: &ImageRef, root: &Path) -> CoverResult<PreparedImage> {
    match image_ref {
        ImageRef::DataUri { bytes, .. } => decode_image(bytes),
        ImageRef::Remote(url) => Err(CoverError::image_load(format!(
            "remote image '{url}' must be fetched by the host before decoding"
        ))),
        ImageRef::File(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read image bytes from '{}'", path.display()))
                .map_err(|e| CoverError::image_load(format!("{e:#}")))?;
            decode_image(&bytes)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
