use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::core::Canvas,
    foundation::error::{MaskpaintError, MaskpaintResult},
    foundation::math::{Fnv1a64, premultiply_rgba8_in_place},
};

/// Content hash of a decoded image, used to key cached raster paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub(crate) u64);

impl ImageId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A decoded base image held in memory for the lifetime of a labeling pass.
///
/// Pixels are premultiplied RGBA8, row-major. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct BaseImage {
    name: String,
    canvas: Canvas,
    rgba8_premul: Arc<Vec<u8>>,
    id: ImageId,
}

impl BaseImage {
    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_rgba8(
        name: impl Into<String>,
        width: u32,
        height: u32,
        mut rgba8: Vec<u8>,
    ) -> MaskpaintResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(name, width, height, rgba8)
    }

    pub fn from_premul_rgba8(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> MaskpaintResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if rgba8_premul.len() != canvas.rgba8_len() {
            return Err(MaskpaintError::validation(format!(
                "image byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }

        let mut h = Fnv1a64::new_default();
        h.write_u32(width);
        h.write_u32(height);
        h.write_bytes(&rgba8_premul);

        Ok(Self {
            name: name.into(),
            canvas,
            rgba8_premul: Arc::new(rgba8_premul),
            id: ImageId(h.finish()),
        })
    }

    /// Display name, typically the archive entry or file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub fn id(&self) -> ImageId {
        self.id
    }
}

/// Decode a PNG. Other formats are refused so the export stays in the
/// input's lossless format.
pub fn decode_image(name: impl Into<String>, bytes: &[u8]) -> MaskpaintResult<BaseImage> {
    let name = name.into();
    let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .with_context(|| format!("decode png '{name}' from memory"))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    BaseImage::from_rgba8(name, width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
