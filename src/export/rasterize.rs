use crate::{
    assets::decode::BaseImage,
    export::encode::{binarize_mask, encode_png},
    export::package::{ExportArchive, ExportOptions, package_archive},
    foundation::error::MaskpaintResult,
    render::backend::{FrameRGBA, RenderMode, Scene, StrokeStyle, SurfaceRenderer},
    stroke::store::StrokeSet,
    surface::drawing::DrawingSurface,
};

/// The two export rasters, canvas-sized and premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRasters {
    pub annotated: FrameRGBA,
    pub mask: FrameRGBA,
}

/// Rasterize `strokes` over `image` and as a standalone mask.
pub fn rasterize_labels(
    renderer: &mut dyn SurfaceRenderer,
    image: &BaseImage,
    strokes: &StrokeSet,
    style: &StrokeStyle,
    binarize: bool,
) -> MaskpaintResult<ExportRasters> {
    let scene = Scene {
        canvas: image.canvas(),
        mode: RenderMode::Annotated,
        image: Some(image),
        strokes,
        in_progress: None,
        style,
    };
    let annotated = renderer.render(&scene)?;
    let mut mask = renderer.render(&Scene {
        mode: RenderMode::Mask,
        image: None,
        ..scene
    })?;
    if binarize {
        binarize_mask(&mut mask, style.mask_fill);
    }
    Ok(ExportRasters { annotated, mask })
}

/// Encode both rasters and package them into one archive. Nothing is returned
/// unless both encodes and the packaging succeed.
pub fn package_rasters(
    rasters: &ExportRasters,
    options: &ExportOptions,
) -> MaskpaintResult<ExportArchive> {
    options.validate()?;
    let annotated_png = encode_png(&rasters.annotated)?;
    let mask_png = encode_png(&rasters.mask)?;
    let bytes = package_archive(&[
        (options.annotated_entry.as_str(), annotated_png.as_slice()),
        (options.mask_entry.as_str(), mask_png.as_slice()),
    ])?;
    Ok(ExportArchive {
        name: options.archive_name.clone(),
        entries: vec![options.annotated_entry.clone(), options.mask_entry.clone()],
        bytes,
    })
}

/// Export the committed labels of `surface`.
///
/// Any in-progress stroke is ignored. The surface is only borrowed for
/// rendering: its strokes, zoom and visible canvas are left as they were, also
/// when the export fails.
#[tracing::instrument(skip_all, fields(strokes = surface.strokes().len()))]
pub fn export_labels(
    surface: &mut DrawingSurface,
    options: &ExportOptions,
) -> MaskpaintResult<ExportArchive> {
    let rasters = surface.rasterize_committed(options.binarize_mask)?;
    let archive = package_rasters(&rasters, options)?;
    tracing::debug!(bytes = archive.bytes.len(), name = %archive.name, "export packaged");
    Ok(archive)
}

#[cfg(test)]
#[path = "../../tests/unit/export/rasterize.rs"]
mod tests;
