use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    export::package::ExportOptions,
    foundation::error::{MaskpaintError, MaskpaintResult},
    render::backend::StrokeStyle,
    stroke::closure::ClosurePolicy,
    view::state::ZoomConfig,
};

/// Tunables for a labeling surface and its export. Every field has a default,
/// so an empty JSON object is a valid config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub closure: ClosurePolicy,
    pub zoom: ZoomConfig,
    pub style: StrokeStyle,
    pub export: ExportOptions,
}

impl LabelConfig {
    pub fn from_json_str(s: &str) -> MaskpaintResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse label config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> MaskpaintResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open label config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse label config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MaskpaintResult<()> {
        self.closure.validate()?;
        self.zoom.validate()?;
        self.style.validate()?;
        self.export.validate()
    }

    pub fn to_json_pretty(&self) -> MaskpaintResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MaskpaintError::validation(format!("serialize label config: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
