use crate::foundation::{
    core::{Canvas, Rect},
    error::{CoverError, CoverResult},
};

/// Gaussian kernel parameters for a CSS-style blur length.
///
/// A `blur(Npx)` filter uses `N` as the standard deviation; the kernel extends to `3σ`.
/// Returns `(0, 0.0)` (identity) for non-positive or non-finite lengths.
pub fn kernel_for_blur_px(blur_px: f64) -> (u32, f32) {
    if !blur_px.is_finite() || blur_px <= 0.0 {
        return (0, 0.0);
    }
    let radius = (blur_px * 3.0).ceil().max(1.0) as u32;
    (radius, blur_px as f32)
}

/// Separable Gaussian blur over premultiplied RGBA8 with clamped edges.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CoverResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CoverError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CoverError::validation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    let mut out = src.to_vec();
    if radius == 0 || width == 0 || height == 0 {
        return Ok(out);
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let window = Window {
        x0: 0,
        y0: 0,
        width: width as usize,
        height: height as usize,
        stride_px: width as usize,
    };
    let mut tmp = vec![0u8; expected_len];
    horizontal_pass(src, window, &kernel, &mut tmp);
    vertical_pass(&tmp, window, &kernel, &mut out);
    Ok(out)
}

/// Blur only the pixels inside `region` (clipped to the buffer), in place.
///
/// Pixels outside the region are untouched and do not contribute; callers pass a region
/// with at least `radius` pixels of transparent margin around the content.
pub fn blur_region_in_place(
    rgba8_premul: &mut [u8],
    canvas: Canvas,
    region: Rect,
    radius: u32,
    sigma: f32,
) -> CoverResult<()> {
    if rgba8_premul.len() != canvas.rgba_len() {
        return Err(CoverError::validation(
            "blur_region_in_place expects buffer matching canvas",
        ));
    }
    if radius == 0 {
        return Ok(());
    }
    let clip = region.intersect(canvas.bounds());
    let x0 = clip.x0.floor().max(0.0) as usize;
    let y0 = clip.y0.floor().max(0.0) as usize;
    let x1 = (clip.x1.ceil() as usize).min(canvas.width as usize);
    let y1 = (clip.y1.ceil() as usize).min(canvas.height as usize);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let window = Window {
        x0,
        y0,
        width: x1 - x0,
        height: y1 - y0,
        stride_px: canvas.width as usize,
    };
    let mut tmp = vec![0u8; window.width * window.height * 4];
    horizontal_pass(rgba8_premul, window, &kernel, &mut tmp);
    vertical_pass(&tmp, window, &kernel, rgba8_premul);
    Ok(())
}

const Q16_ONE: u32 = 1 << 16;

/// Gaussian taps in Q16 fixed point, summing to exactly [`Q16_ONE`].
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CoverResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![Q16_ONE]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CoverError::validation("blur sigma must be > 0"));
    }

    let r = i64::from(radius);
    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let taps: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = taps.iter().sum();
    let mut weights: Vec<u32> = taps
        .iter()
        .map(|w| (w / total * f64::from(Q16_ONE)).round() as u32)
        .collect();

    // Rounding residue goes to the center tap.
    let sum: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + i64::from(Q16_ONE) - sum)
        .clamp(0, i64::from(Q16_ONE)) as u32;
    Ok(weights)
}

/// Sub-rectangle of an RGBA8 buffer whose rows are `stride_px` pixels long.
#[derive(Clone, Copy, Debug)]
struct Window {
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    stride_px: usize,
}

impl Window {
    /// Byte offset of window pixel `(x, y)` in the full buffer.
    fn offset(&self, x: usize, y: usize) -> usize {
        ((self.y0 + y) * self.stride_px + self.x0 + x) * 4
    }

    /// Byte offset of window pixel `(x, y)` in a packed `width × height` buffer.
    fn packed(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }
}

/// Blur rows of `win` in `src` into the packed buffer `tmp`. Edges clamp to the window.
fn horizontal_pass(src: &[u8], win: Window, k: &[u32], tmp: &mut [u8]) {
    let radius = k.len() / 2;
    let last = win.width - 1;
    for y in 0..win.height {
        for x in 0..win.width {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki).saturating_sub(radius).min(last);
                accumulate(&mut acc, kw, &src[win.offset(sx, y)..][..4]);
            }
            store(&mut tmp[win.packed(x, y)..][..4], acc);
        }
    }
}

/// Blur columns of the packed buffer `tmp` back into `win` of `dst`.
fn vertical_pass(tmp: &[u8], win: Window, k: &[u32], dst: &mut [u8]) {
    let radius = k.len() / 2;
    let last = win.height - 1;
    for y in 0..win.height {
        for x in 0..win.width {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki).saturating_sub(radius).min(last);
                accumulate(&mut acc, kw, &tmp[win.packed(x, sy)..][..4]);
            }
            store(&mut dst[win.offset(x, y)..][..4], acc);
        }
    }
}

fn accumulate(acc: &mut [u64; 4], weight: u32, px: &[u8]) {
    for (a, &v) in acc.iter_mut().zip(px) {
        *a += u64::from(weight) * u64::from(v);
    }
}

fn store(px: &mut [u8], acc: [u64; 4]) {
    for (p, a) in px.iter_mut().zip(acc) {
        *p = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
