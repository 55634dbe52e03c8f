use std::{io::Cursor, sync::Arc};

use crate::{
    export::targets::ExportTarget,
    foundation::{
        core::Canvas,
        error::{CoverError, CoverResult},
    },
    render::{cpu::render_layer, surface::Surface},
};

/// One encoded cover, ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    /// Download name, `cover-<label>.png`.
    pub file_name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Draw the whole of `source` into a fresh `width`×`height` surface.
///
/// The source is stretched to fill the target on both axes; aspect ratio is not preserved.
pub fn rescale(source: &Surface, width: u32, height: u32) -> CoverResult<Surface> {
    let target = Canvas::new(width, height)
        .map_err(|e| CoverError::export(format!("target surface {width}x{height}: {e}")))?;
    let src = source.canvas();

    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(source.pixmap().clone())),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    let pixmap = render_layer(target, |ctx| {
        ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(
            target.width_f64() / src.width_f64(),
            target.height_f64() / src.height_f64(),
        ));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            src.width_f64(),
            src.height_f64(),
        ));
        Ok(())
    })?;
    Surface::from_pixmap(target, pixmap)
}

/// Encode a surface as PNG (straight alpha RGBA8).
pub fn encode_png(surface: &Surface) -> CoverResult<Vec<u8>> {
    let Canvas { width, height } = surface.canvas();
    let img = image::RgbaImage::from_raw(width, height, surface.to_straight_rgba8())
        .ok_or_else(|| CoverError::export("pixel buffer does not match surface size"))?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CoverError::export(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Rescale `composed` to `target` and encode it.
#[tracing::instrument(level = "debug", skip_all, fields(label = target.label))]
pub fn export_surface(composed: &Surface, target: ExportTarget) -> CoverResult<ExportedFile> {
    let scaled = rescale(composed, target.width, target.height)?;
    let png = encode_png(&scaled)?;
    tracing::debug!(bytes = png.len(), "encoded export");
    Ok(ExportedFile {
        file_name: target.file_name(),
        width: target.width,
        height: target.height,
        png,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
