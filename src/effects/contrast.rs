use crate::foundation::{
    core::{Canvas, Ink, Rect},
    math::unpremultiply,
};

/// Mean straight-alpha RGB over a sampled region, each channel in `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AverageRgb {
    /// Mean red, `0..=255`.
    pub r: f64,
    /// Mean green, `0..=255`.
    pub g: f64,
    /// Mean blue, `0..=255`.
    pub b: f64,
    /// Number of pixels averaged.
    pub samples: usize,
}

impl AverageRgb {
    /// Perceived brightness in `[0, 1]`: `(0.299R + 0.587G + 0.114B) / 255`.
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r + 0.587 * self.g + 0.114 * self.b) / 255.0
    }
}

/// Average the pixels of `region` (clipped to the surface) from a premultiplied RGBA8 buffer.
///
/// Returns `None` when the clipped region is empty or the buffer does not match `canvas`.
pub fn sample_average_rgb(rgba8_premul: &[u8], canvas: Canvas, region: Rect) -> Option<AverageRgb> {
    if rgba8_premul.len() != canvas.rgba_len() {
        return None;
    }
    let clip = region.intersect(canvas.bounds());
    let x0 = clip.x0.floor().max(0.0) as usize;
    let y0 = clip.y0.floor().max(0.0) as usize;
    let x1 = (clip.x1.ceil() as usize).min(canvas.width as usize);
    let y1 = (clip.y1.ceil() as usize).min(canvas.height as usize);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let stride = canvas.width as usize * 4;
    let mut sum = [0u64; 3];
    for y in y0..y1 {
        let row = &rgba8_premul[y * stride + x0 * 4..y * stride + x1 * 4];
        for px in row.chunks_exact(4) {
            let [r, g, b, _] = unpremultiply([px[0], px[1], px[2], px[3]]);
            sum[0] += u64::from(r);
            sum[1] += u64::from(g);
            sum[2] += u64::from(b);
        }
    }
    let samples = (x1 - x0) * (y1 - y0);
    let n = samples as f64;
    Some(AverageRgb {
        r: sum[0] as f64 / n,
        g: sum[1] as f64 / n,
        b: sum[2] as f64 / n,
        samples,
    })
}

/// Ink and outline picked for a measured background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastChoice {
    /// Fill color of the title.
    pub ink: Ink,
    /// Outline color, always the opposite of `ink`.
    pub outline: Ink,
    /// Luminance of the sampled region in `[0, 1]`.
    pub luminance: f64,
}

/// Black ink on light backgrounds (`luminance > 0.5`), white otherwise; outline is the
/// opposite of the ink. A luminance of exactly 0.5 yields white ink.
pub fn choose_ink(luminance: f64) -> ContrastChoice {
    let ink = if luminance > 0.5 { Ink::Black } else { Ink::White };
    ContrastChoice {
        ink,
        outline: ink.opposite(),
        luminance,
    }
}

/// Sample `region` and choose the ink for it. Unsampleable regions are treated as dark.
pub fn contrast_for_region(rgba8_premul: &[u8], canvas: Canvas, region: Rect) -> ContrastChoice {
    let luminance = sample_average_rgb(rgba8_premul, canvas, region)
        .map(|avg| avg.luminance())
        .unwrap_or(0.0);
    choose_ink(luminance)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/contrast.rs"]
mod tests;
