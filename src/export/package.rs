use std::{
    io::{Cursor, Write},
    path::Path,
};

use anyhow::Context;

use crate::foundation::error::{MaskpaintError, MaskpaintResult};

/// Names and options for the exported archive.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub archive_name: String,
    pub annotated_entry: String,
    pub mask_entry: String,
    /// Threshold anti-aliased mask edges to fully on/off pixels.
    pub binarize_mask: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            archive_name: "exported_files.zip".to_string(),
            annotated_entry: "manipulated_image.png".to_string(),
            mask_entry: "labeling_mask.png".to_string(),
            binarize_mask: true,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> MaskpaintResult<()> {
        for (field, value) in [
            ("archive_name", &self.archive_name),
            ("annotated_entry", &self.annotated_entry),
            ("mask_entry", &self.mask_entry),
        ] {
            if value.trim().is_empty() {
                return Err(MaskpaintError::validation(format!(
                    "export {field} must not be empty"
                )));
            }
        }
        if self.annotated_entry == self.mask_entry {
            return Err(MaskpaintError::validation(format!(
                "export entries must differ, both are '{}'",
                self.mask_entry
            )));
        }
        Ok(())
    }
}

/// A finished export: the zip bytes and the names they were written under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArchive {
    pub name: String,
    pub entries: Vec<String>,
    pub bytes: Vec<u8>,
}

impl ExportArchive {
    /// Write the archive to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> MaskpaintResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write archive '{}'", path.display()))?;
        Ok(())
    }
}

/// Build a deflate-compressed zip with one entry per `(name, bytes)` pair, in order.
pub fn package_archive(entries: &[(&str, &[u8])]) -> MaskpaintResult<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(*name, opts)?;
        writer
            .write_all(bytes)
            .map_err(|e| MaskpaintError::archive(format!("write entry '{name}': {e}")))?;
    }
    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/export/package.rs"]
mod tests;
