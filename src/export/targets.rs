/// A named output size for social-media covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ExportTarget {
    /// Platform name, also used in the file name.
    pub label: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl ExportTarget {
    /// Twitter / X card, 1200×675.
    pub const TWITTER: Self = Self::new("Twitter", 1200, 675);
    /// LinkedIn post, 1200×627.
    pub const LINKEDIN: Self = Self::new("LinkedIn", 1200, 627);
    /// Facebook link preview, 1200×630.
    pub const FACEBOOK: Self = Self::new("Facebook", 1200, 630);
    /// Instagram square, 1080×1080.
    pub const INSTAGRAM: Self = Self::new("Instagram", 1080, 1080);
    /// WordPress featured image, 1200×628.
    pub const WORDPRESS: Self = Self::new("WordPress", 1200, 628);

    const fn new(label: &'static str, width: u32, height: u32) -> Self {
        Self {
            label,
            width,
            height,
        }
    }

    /// The fixed export catalog, in display order.
    pub fn catalog() -> &'static [ExportTarget] {
        const CATALOG: [ExportTarget; 5] = [
            ExportTarget::TWITTER,
            ExportTarget::LINKEDIN,
            ExportTarget::FACEBOOK,
            ExportTarget::INSTAGRAM,
            ExportTarget::WORDPRESS,
        ];
        &CATALOG
    }

    /// Case-insensitive lookup by label.
    pub fn find(label: &str) -> Option<Self> {
        Self::catalog()
            .iter()
            .find(|t| t.label.eq_ignore_ascii_case(label.trim()))
            .copied()
    }

    /// Download file name: `cover-<lowercased label>.png`.
    pub fn file_name(&self) -> String {
        format!("cover-{}.png", self.label.to_lowercase())
    }
}

impl std::fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}x{}", self.label, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/targets.rs"]
mod tests;
