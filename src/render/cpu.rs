use std::sync::Arc;

use crate::{
    assets::decode::{BaseImage, ImageId},
    foundation::core::{BezPath, Canvas, Rgba8},
    foundation::error::{MaskpaintError, MaskpaintResult},
    render::backend::{FrameRGBA, RenderMode, Scene, StrokeStyle, SurfaceRenderer, stroke_path},
};

/// `vello_cpu` renderer. Keeps the current base image as a ready-to-blit paint.
#[derive(Default)]
pub struct CpuRenderer {
    image_cache: Option<(ImageId, vello_cpu::Image)>,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn image_paint_for(&mut self, image: &BaseImage) -> MaskpaintResult<vello_cpu::Image> {
        if let Some((id, paint)) = &self.image_cache
            && *id == image.id()
        {
            return Ok(paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(image.rgba8_premul(), image.canvas())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some((image.id(), paint.clone()));
        Ok(paint)
    }
}

impl SurfaceRenderer for CpuRenderer {
    fn render(&mut self, scene: &Scene<'_>) -> MaskpaintResult<FrameRGBA> {
        let (w, h) = canvas_to_u16(scene.canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match scene.mode {
            RenderMode::Annotated => {
                if let Some(image) = scene.image {
                    let paint = self.image_paint_for(image)?;
                    ctx.set_paint(paint);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(image.width()),
                        f64::from(image.height()),
                    ));
                }
                for points in scene.strokes.iter() {
                    let path = bezpath_to_cpu(&stroke_path(points, true));
                    outline(&mut ctx, &path, scene.style);
                    fill(&mut ctx, &path, scene.style.highlight);
                }
                if let Some(points) = scene.in_progress
                    && points.len() > 1
                {
                    let path = bezpath_to_cpu(&stroke_path(points, false));
                    outline(&mut ctx, &path, scene.style);
                }
            }
            RenderMode::Mask => {
                for points in scene.strokes.iter() {
                    let path = bezpath_to_cpu(&stroke_path(points, true));
                    fill(&mut ctx, &path, scene.style.mask_fill);
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn outline(ctx: &mut vello_cpu::RenderContext, path: &vello_cpu::kurbo::BezPath, style: &StrokeStyle) {
    let c = style.outline;
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.outline_width));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    ctx.stroke_path(path);
}

fn fill(ctx: &mut vello_cpu::RenderContext, path: &vello_cpu::kurbo::BezPath, color: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(path);
}

fn canvas_to_u16(canvas: Canvas) -> MaskpaintResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MaskpaintError::raster("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MaskpaintError::raster("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    canvas: Canvas,
) -> MaskpaintResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_to_u16(canvas)?;
    if rgba8_premul.len() != canvas.rgba8_len() {
        return Err(MaskpaintError::raster("base image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(canvas.pixel_count());
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
