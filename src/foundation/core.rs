use crate::foundation::error::{MaskpaintError, MaskpaintResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Pixel dimensions of a drawing canvas.
///
/// Both sides are limited to `1..=65535` because the CPU raster backend addresses
/// surfaces with 16-bit sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Largest accepted width or height.
    pub const MAX_SIDE: u32 = u16::MAX as u32;

    pub fn new(width: u32, height: u32) -> MaskpaintResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskpaintError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(MaskpaintError::validation(format!(
                "canvas {width}x{height} exceeds {max}x{max}",
                max = Self::MAX_SIDE
            )));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn rgba8_len(self) -> usize {
        self.pixel_count() * 4
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < f64::from(self.width) && p.y < f64::from(self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Premultiplied `[r, g, b, a]` bytes, rounded the same way image decode rounds.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            crate::foundation::math::mul_div255_u8(u16::from(self.r), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.g), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
