use std::io::Cursor;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{MaskpaintError, MaskpaintResult},
    foundation::math::unpremultiply_rgba8_in_place,
    render::backend::FrameRGBA,
};

/// Coverage at or above this alpha counts as inside a labeled region.
pub const MASK_ALPHA_CUTOFF: u8 = 128;

/// Encode a frame as PNG with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> MaskpaintResult<Vec<u8>> {
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba).ok_or_else(|| {
        MaskpaintError::raster(format!(
            "frame buffer of {} bytes does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        ))
    })?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| MaskpaintError::raster(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Snap anti-aliased coverage so every pixel is either `fill` or transparent.
pub fn binarize_mask(frame: &mut FrameRGBA, fill: Rgba8) {
    let on = if frame.premultiplied {
        fill.to_premul()
    } else {
        [fill.r, fill.g, fill.b, fill.a]
    };
    let cutoff = u16::from(MASK_ALPHA_CUTOFF) * u16::from(fill.a) / 255;
    for px in frame.data.chunks_exact_mut(4) {
        if fill.a > 0 && u16::from(px[3]) >= cutoff.max(1) {
            px.copy_from_slice(&on);
        } else {
            px.fill(0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
