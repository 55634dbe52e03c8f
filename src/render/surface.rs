use crate::{
    effects::composite::{over_in_place, over_offset_in_place},
    foundation::{
        core::{Canvas, Rgba8},
        error::{CoverError, CoverResult},
        math::unpremultiply_in_place,
    },
};

/// A raster drawing surface holding premultiplied RGBA8 pixels.
#[derive(Clone)]
pub struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("canvas", &self.canvas).finish()
    }
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(canvas: Canvas) -> CoverResult<Self> {
        let (w, h) = canvas.dims_u16()?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Wrap a rendered pixmap; its size must match `canvas`.
    pub(crate) fn from_pixmap(canvas: Canvas, pixmap: vello_cpu::Pixmap) -> CoverResult<Self> {
        if pixmap.data_as_u8_slice().len() != canvas.rgba_len() {
            return Err(CoverError::canvas_init(format!(
                "pixmap does not match {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        Ok(Self { canvas, pixmap })
    }

    /// Pixel size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub(crate) fn pixmap(&self) -> &vello_cpu::Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Premultiplied pixel at `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let premul = color.to_premul();
        for px in self.data_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Replace the contents with premultiplied bytes of the same size.
    pub(crate) fn copy_from(&mut self, rgba8_premul: &[u8]) -> CoverResult<()> {
        if rgba8_premul.len() != self.canvas.rgba_len() {
            return Err(CoverError::image_load(format!(
                "pixel buffer of {} bytes does not match {}x{} surface",
                rgba8_premul.len(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        self.data_mut().copy_from_slice(rgba8_premul);
        Ok(())
    }

    /// Composite an equal-sized layer over this surface.
    pub(crate) fn composite(
        &mut self,
        layer: &[u8],
        offset: (i32, i32),
        opacity: f32,
    ) -> CoverResult<()> {
        let Canvas { width, height } = self.canvas;
        if offset == (0, 0) {
            over_in_place(self.data_mut(), layer, opacity)
        } else {
            over_offset_in_place(self.data_mut(), layer, width, height, offset, opacity)
        }
    }

    /// Straight-alpha RGBA8 copy suitable for encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data().to_vec();
        unpremultiply_in_place(&mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
