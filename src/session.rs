use crate::{
    assets::archive::ImageBundle,
    assets::decode::BaseImage,
    config::LabelConfig,
    foundation::error::{MaskpaintError, MaskpaintResult},
    surface::drawing::DrawingSurface,
};

/// A loaded image bundle plus the surface showing the selected image.
///
/// Switching images discards the strokes of the previous one; nothing carries
/// over between images.
#[derive(Debug)]
pub struct LabelSession {
    bundle: ImageBundle,
    selected: Option<usize>,
    surface: DrawingSurface,
}

impl Default for LabelSession {
    fn default() -> Self {
        Self::new(&LabelConfig::default())
    }
}

impl LabelSession {
    pub fn new(config: &LabelConfig) -> Self {
        Self::with_surface(DrawingSurface::new(config))
    }

    pub fn with_surface(surface: DrawingSurface) -> Self {
        Self {
            bundle: ImageBundle::default(),
            selected: None,
            surface,
        }
    }

    /// Replace the image list and select its first image.
    pub fn open(&mut self, bundle: ImageBundle) {
        self.bundle = bundle;
        self.selected = None;
        match self.bundle.first().cloned() {
            Some(first) => {
                self.selected = Some(0);
                self.surface.load_image(first);
            }
            None => self.surface.unload(),
        }
    }

    pub fn select(&mut self, name: &str) -> MaskpaintResult<()> {
        let (index, image) = self
            .bundle
            .iter()
            .enumerate()
            .find(|(_, img)| img.name() == name)
            .map(|(i, img)| (i, img.clone()))
            .ok_or_else(|| MaskpaintError::validation(format!("no image named '{name}'")))?;
        tracing::debug!(name, index, "select image");
        self.selected = Some(index);
        self.surface.load_image(image);
        Ok(())
    }

    /// Drop every image and unload the surface.
    pub fn clear(&mut self) {
        self.bundle = ImageBundle::default();
        self.selected = None;
        self.surface.unload();
    }

    pub fn selected(&self) -> Option<&BaseImage> {
        self.selected.and_then(|i| self.bundle.iter().nth(i))
    }

    pub fn image_names(&self) -> Vec<&str> {
        self.bundle.names()
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
