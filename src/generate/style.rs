use std::str::FromStr;

use crate::foundation::error::{CoverError, CoverResult};

/// Visual style offered to the background generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTemplate {
    /// Clean, contemporary look.
    #[default]
    Modern,
    /// Simple and elegant.
    Minimal,
    /// Strong typography and high contrast.
    Bold,
    /// Geometric tech aesthetic.
    Tech,
    /// Artistic and expressive.
    Creative,
}

impl StyleTemplate {
    /// Every template, in menu order.
    pub const ALL: [StyleTemplate; 5] = [
        Self::Modern,
        Self::Minimal,
        Self::Bold,
        Self::Tech,
        Self::Creative,
    ];

    /// Wire name, e.g. `"tech"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Minimal => "minimal",
            Self::Bold => "bold",
            Self::Tech => "tech",
            Self::Creative => "creative",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Modern => "Modern",
            Self::Minimal => "Minimal",
            Self::Bold => "Bold",
            Self::Tech => "Tech",
            Self::Creative => "Creative",
        }
    }

    /// One-line description shown next to the label.
    pub fn description(self) -> &'static str {
        match self {
            Self::Modern => "Clean and contemporary design with balanced typography",
            Self::Minimal => "Simple and elegant with focus on essential elements",
            Self::Bold => "Strong typography and high contrast for impact",
            Self::Tech => "Modern tech aesthetic with geometric patterns",
            Self::Creative => "Artistic and expressive with unique layouts",
        }
    }

    /// Style clause inserted into the generation prompt.
    pub fn prompt_fragment(self) -> &'static str {
        match self {
            Self::Modern => "modern, clean, minimalist design with balanced typography",
            Self::Minimal => "minimal, elegant design focusing on essential elements",
            Self::Bold => "bold, high-contrast design with strong typography",
            Self::Tech => "tech-inspired design with geometric patterns and digital aesthetic",
            Self::Creative => "creative, artistic design with unique layout and expressive elements",
        }
    }

    /// Parse a style name, falling back to [`StyleTemplate::Modern`] for unknown names.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for StyleTemplate {
    type Err = CoverError;

    fn from_str(s: &str) -> CoverResult<Self> {
        let want = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(want))
            .ok_or_else(|| CoverError::validation(format!("unknown style '{want}'")))
    }
}

/// Fonts offered for the title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    /// Inter.
    #[default]
    Inter,
    /// Roboto.
    Roboto,
    /// Montserrat.
    Montserrat,
    /// Playfair Display.
    Playfair,
}

impl FontChoice {
    /// Every font, in menu order.
    pub const ALL: [FontChoice; 4] = [Self::Inter, Self::Roboto, Self::Montserrat, Self::Playfair];

    /// Wire value and the family name handed to the typeface.
    pub fn value(self) -> &'static str {
        match self {
            Self::Inter => "inter",
            Self::Roboto => "roboto",
            Self::Montserrat => "montserrat",
            Self::Playfair => "playfair",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Roboto => "Roboto",
            Self::Montserrat => "Montserrat",
            Self::Playfair => "Playfair Display",
        }
    }
}

impl FromStr for FontChoice {
    type Err = CoverError;

    fn from_str(s: &str) -> CoverResult<Self> {
        let want = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.value().eq_ignore_ascii_case(want) || f.label().eq_ignore_ascii_case(want))
            .ok_or_else(|| CoverError::validation(format!("unknown font '{want}'")))
    }
}

/// An opaque sRGB color written as `#rrggbb` (or shorthand `#rgb`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl HexColor {
    /// Color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = CoverError;

    fn from_str(s: &str) -> CoverResult<Self> {
        let bad = || CoverError::validation(format!("invalid hex color '{s}'"));
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = CoverError;

    fn try_from(s: String) -> CoverResult<Self> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/style.rs"]
mod tests;
