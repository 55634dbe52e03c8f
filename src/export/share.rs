use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::foundation::error::{CoverError, CoverResult};

/// Bytes left unescaped in query components: ASCII alphanumerics and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Social network with a web share intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    /// Twitter / X tweet composer.
    Twitter,
    /// LinkedIn share-offsite dialog.
    LinkedIn,
    /// Facebook sharer.
    Facebook,
}

/// Size of the popup window a share intent is opened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PopupSize {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl PopupSize {
    /// Top-left corner that centers the popup on a `screen_width`×`screen_height` screen.
    pub fn centered_origin(self, screen_width: f64, screen_height: f64) -> (f64, f64) {
        (
            screen_width / 2.0 - f64::from(self.width) / 2.0,
            screen_height / 2.0 - f64::from(self.height) / 2.0,
        )
    }
}

impl SharePlatform {
    /// Every platform, in menu order.
    pub const ALL: [SharePlatform; 3] = [Self::Twitter, Self::LinkedIn, Self::Facebook];

    /// Lowercase key, e.g. `"linkedin"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::Facebook => "facebook",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::Facebook => "Facebook",
        }
    }

    /// Popup window size the platform's dialog is designed for.
    pub fn popup(self) -> PopupSize {
        let (width, height) = match self {
            Self::Twitter => (550, 420),
            Self::LinkedIn => (600, 600),
            Self::Facebook => (670, 340),
        };
        PopupSize { width, height }
    }

    /// Share-intent URL for `url`. Only Twitter carries the title; the other platforms
    /// read it from the page's own metadata.
    pub fn intent_url(self, url: &str, title: &str) -> String {
        let url = encode_component(url);
        match self {
            Self::Twitter => format!(
                "https://twitter.com/intent/tweet?text={}&url={url}",
                encode_component(title)
            ),
            Self::LinkedIn => format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
            Self::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        }
    }
}

impl FromStr for SharePlatform {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoverError::validation(format!("unsupported share platform '{s}'")))
    }
}

impl std::fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Share-intent URL for the platform named `platform` (case-insensitive).
pub fn share_url(platform: &str, url: &str, title: &str) -> CoverResult<String> {
    let platform: SharePlatform = platform.parse()?;
    Ok(platform.intent_url(url, title))
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_COMPONENT).to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/export/share.rs"]
mod tests;
