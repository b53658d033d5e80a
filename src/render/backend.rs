use crate::{
    assets::decode::BaseImage,
    foundation::core::{BezPath, Canvas, Point, Rgba8},
    foundation::error::{MaskpaintError, MaskpaintResult},
    stroke::store::StrokeSet,
};

/// Rendered raster, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Colors and widths used to draw labeled regions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeStyle {
    /// Translucent interior fill of accepted strokes on the visible canvas.
    pub highlight: Rgba8,
    /// Outline color for accepted and in-progress strokes.
    pub outline: Rgba8,
    pub outline_width: f64,
    /// Interior fill of the export mask.
    pub mask_fill: Rgba8,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            highlight: Rgba8::new(255, 0, 0, 128),
            outline: Rgba8::opaque(0, 0, 0),
            outline_width: 1.0,
            mask_fill: Rgba8::opaque(0, 0, 0),
        }
    }
}

impl StrokeStyle {
    pub fn validate(&self) -> MaskpaintResult<()> {
        if !self.outline_width.is_finite() || self.outline_width <= 0.0 {
            return Err(MaskpaintError::validation(format!(
                "outline_width must be finite and > 0, got {}",
                self.outline_width
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Base image, outlined strokes with highlight fill, in-progress polyline.
    Annotated,
    /// Transparent background with solid-filled strokes only.
    Mask,
}

/// Everything a renderer needs to produce one projection of the surface.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub canvas: Canvas,
    pub mode: RenderMode,
    pub image: Option<&'a BaseImage>,
    pub strokes: &'a StrokeSet,
    pub in_progress: Option<&'a [Point]>,
    pub style: &'a StrokeStyle,
}

/// Turns a [`Scene`] into pixels. Output must depend only on the scene.
pub trait SurfaceRenderer {
    fn render(&mut self, scene: &Scene<'_>) -> MaskpaintResult<FrameRGBA>;
}

/// Replays recorded points as a polyline: move to the first, line to the rest.
pub fn stroke_path(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    for &p in rest {
        path.line_to(p);
    }
    if close {
        path.close_path();
    }
    path
}
