use std::{borrow::Cow, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::Rect,
    error::{CoverError, CoverResult},
};

/// How a line of text is inked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InkMode {
    /// Fill glyph interiors with the current paint.
    Fill,
    /// Stroke glyph outlines with the current paint and stroke.
    Stroke,
}

/// Text measurement and glyph drawing used by the compositor.
///
/// Paint, stroke and opacity are configured on the render context by the caller; an
/// implementation only positions and emits glyphs.
pub trait Typeface {
    /// Advance width of `text` as a single line at `size_px`.
    fn measure(&mut self, family: &str, text: &str, size_px: f64) -> f64;

    /// Draw `text` as a single line inside `line_box`, left-aligned and vertically centered.
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        family: &str,
        text: &str,
        size_px: f64,
        line_box: Rect,
        mode: InkMode,
    ) -> CoverResult<()>;
}

struct FontFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Font files shaped with Parley and rasterized with `vello_cpu`.
///
/// Families are matched case-insensitively; a request that matches nothing falls back to
/// the first loaded face.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    faces: Vec<FontFace>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families().collect::<Vec<_>>())
            .finish()
    }
}

impl FontBook {
    /// Empty book; measuring yields zero and drawing fails until fonts are added.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: Vec::new(),
        }
    }

    /// Load every font file in `dir`; fails if none could be loaded.
    pub fn from_dir(dir: &Path) -> CoverResult<Self> {
        let mut book = Self::new();
        if book.load_dir(dir)? == 0 {
            return Err(CoverError::validation(format!(
                "no usable .ttf/.otf/.ttc fonts in '{}'",
                dir.display()
            )));
        }
        Ok(book)
    }

    /// Load `.ttf`, `.otf` and `.ttc` files from `dir` (non-recursive). Unreadable or
    /// unparsable files are skipped. Returns the number of faces added.
    pub fn load_dir(&mut self, dir: &Path) -> CoverResult<usize> {
        let rd = std::fs::read_dir(dir)
            .with_context(|| format!("read font dir '{}'", dir.display()))?;

        let mut paths: Vec<_> = rd
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_font_file(p))
            .collect();
        paths.sort();

        let mut added = 0usize;
        for path in paths {
            match self.load_file(&path) {
                Ok(family) => {
                    tracing::debug!(path = %path.display(), %family, "loaded font");
                    added += 1;
                }
                Err(err) => tracing::warn!(path = %path.display(), %err, "skipping font"),
            }
        }
        Ok(added)
    }

    /// Load one font file and return its family name.
    pub fn load_file(&mut self, path: &Path) -> CoverResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        self.add_font_bytes(bytes)
    }

    /// Register raw font bytes and return the detected family name.
    pub fn add_font_bytes(&mut self, bytes: Vec<u8>) -> CoverResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CoverError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CoverError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        self.faces.push(FontFace {
            family: family.clone(),
            font,
        });
        Ok(family)
    }

    /// Family names of the loaded faces, in load order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().map(|f| f.family.as_str())
    }

    /// Whether no face has been loaded.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Index of the face serving `requested`.
    fn resolve(&self, requested: &str) -> Option<usize> {
        let want = fold_family(requested);
        if !want.is_empty() {
            let folded: Vec<String> = self.faces.iter().map(|f| fold_family(&f.family)).collect();
            if let Some(i) = folded.iter().position(|f| *f == want) {
                return Some(i);
            }
            if let Some(i) = folded.iter().position(|f| f.starts_with(&want)) {
                return Some(i);
            }
        }
        if self.faces.is_empty() { None } else { Some(0) }
    }

    fn layout_line(&mut self, face: usize, text: &str, size_px: f64) -> parley::Layout<()> {
        let family = self.faces[face].family.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl Typeface for FontBook {
    fn measure(&mut self, family: &str, text: &str, size_px: f64) -> f64 {
        let Some(face) = self.resolve(family) else {
            return 0.0;
        };
        f64::from(self.layout_line(face, text, size_px).width())
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        family: &str,
        text: &str,
        size_px: f64,
        line_box: Rect,
        mode: InkMode,
    ) -> CoverResult<()> {
        let face = self
            .resolve(family)
            .ok_or_else(|| CoverError::validation("font book has no faces loaded"))?;
        let layout = self.layout_line(face, text, size_px);
        let font = self.faces[face].font.clone();

        let dy = (line_box.height() - f64::from(layout.height())) / 2.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            line_box.x0,
            line_box.y0 + dy,
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
                match mode {
                    InkMode::Fill => builder.fill_glyphs(glyphs),
                    InkMode::Stroke => builder.stroke_glyphs(glyphs),
                }
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn is_font_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc")
}

/// Lowercase with spaces, dashes and underscores removed: "Playfair Display" -> "playfairdisplay".
fn fold_family(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
