use std::{
    io::{Cursor, Read},
    path::Path,
};

use anyhow::Context;

use crate::{
    assets::decode::{BaseImage, decode_image},
    foundation::error::{MaskpaintError, MaskpaintResult},
};

/// Images pulled out of an input bundle, in archive order.
#[derive(Clone, Debug, Default)]
pub struct ImageBundle {
    images: Vec<BaseImage>,
}

impl ImageBundle {
    pub fn from_images(images: Vec<BaseImage>) -> Self {
        Self { images }
    }

    /// Decode every PNG entry of a zip archive.
    ///
    /// macOS resource forks (`__MACOSX/`) and dotfiles are skipped. An archive
    /// without any PNG entry is an error.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_zip_bytes(bytes: &[u8]) -> MaskpaintResult<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| MaskpaintError::archive(format!("open zip archive: {e}")))?;

        let mut images = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            if !is_png_entry(&name) {
                tracing::trace!(entry = %name, "skipping non-image entry");
                continue;
            }
            let mut buf = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry
                .read_to_end(&mut buf)
                .with_context(|| format!("read zip entry '{name}'"))?;
            images.push(decode_image(name, &buf)?);
        }

        if images.is_empty() {
            return Err(MaskpaintError::archive("no PNG file found in archive"));
        }
        tracing::debug!(count = images.len(), "decoded image bundle");
        Ok(Self { images })
    }

    /// Load a `.zip` bundle or a single `.png` image.
    pub fn from_path(path: &Path) -> MaskpaintResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        let is_zip = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
        if is_zip {
            return Self::from_zip_bytes(&bytes);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if !is_png_entry(&name) {
            return Err(MaskpaintError::validation(format!(
                "input '{}' is neither a .zip bundle nor a .png image",
                path.display()
            )));
        }
        Ok(Self {
            images: vec![decode_image(name, &bytes)?],
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&BaseImage> {
        self.images.iter().find(|img| img.name() == name)
    }

    pub fn first(&self) -> Option<&BaseImage> {
        self.images.first()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BaseImage> + '_ {
        self.images.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.images.iter().map(BaseImage::name).collect()
    }
}

/// Whether an archive entry name looks like a user PNG.
pub fn is_png_entry(name: &str) -> bool {
    let file = name.rsplit('/').next().unwrap_or(name);
    file.ends_with(".png")
        && !name.starts_with("__MACOSX/")
        && !file.starts_with('.')
}

#[cfg(test)]
#[path = "../../tests/unit/assets/archive.rs"]
mod tests;
