use crate::foundation::error::{CoverError, CoverResult};

pub use kurbo::{Point, Rect, Vec2};

/// Pixel size of the drawing surface.
///
/// Always matches the natural size of the most recently loaded background image, or
/// [`Canvas::PLACEHOLDER`] when there is none. The size a host displays the surface at may
/// differ; see [`crate::DisplaySize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canonical empty-state size.
    pub const PLACEHOLDER: Canvas = Canvas {
        width: 1200,
        height: 675,
    };

    /// Validate a surface size. Raster surfaces are limited to `u16` per axis.
    pub fn new(width: u32, height: u32) -> CoverResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoverError::canvas_init(format!(
                "canvas size {width}x{height} has a zero dimension"
            )));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(CoverError::canvas_init(format!(
                "canvas size {width}x{height} exceeds {}px per axis",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Rect covering the whole canvas.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub(crate) fn dims_u16(self) -> CoverResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CoverError::canvas_init("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CoverError::canvas_init("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(CoverError::canvas_init("canvas has a zero dimension"));
        }
        Ok((w, h))
    }
}

/// A point in normalized canvas space: `(0,0)` is the top-left corner, `(1,1)` bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal fraction of canvas width.
    pub x: f64,
    /// Vertical fraction of canvas height.
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Position {
    /// Canvas midpoint.
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    /// Position without clamping.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into `[min, max]`. Non-finite components collapse to the center.
    pub fn clamped(self, min: f64, max: f64) -> Self {
        fn axis(v: f64, min: f64, max: f64) -> f64 {
            if v.is_finite() { v.clamp(min, max) } else { 0.5 }
        }
        Self {
            x: axis(self.x, min, max),
            y: axis(self.y, min, max),
        }
    }

    /// Euclidean distance in normalized units.
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Pixel location of this position on `canvas`.
    pub fn to_canvas(self, canvas: Canvas) -> Point {
        Point::new(self.x * canvas.width_f64(), self.y * canvas.height_f64())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);

    /// Straight-alpha color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiplied bytes (r,g,b already multiplied by a).
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Foreground color picked for legibility against the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ink {
    /// Black ink.
    Black,
    /// White ink.
    White,
}

impl Ink {
    /// The other ink.
    pub fn opposite(self) -> Self {
        match self {
            Ink::Black => Ink::White,
            Ink::White => Ink::Black,
        }
    }

    /// Opaque color of this ink.
    pub fn rgba(self) -> Rgba8 {
        match self {
            Ink::Black => Rgba8::BLACK,
            Ink::White => Rgba8::WHITE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
