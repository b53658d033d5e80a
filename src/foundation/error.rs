/// Convenience result type used across maskpaint.
pub type MaskpaintResult<T> = Result<T, MaskpaintError>;

/// Top-level error taxonomy used by labeling and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum MaskpaintError {
    /// Invalid configuration, image dimensions, or caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rendering or raster encoding failed.
    #[error("raster error: {0}")]
    Raster(String),

    /// Reading or writing a zip archive failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskpaintError {
    /// Build a [`MaskpaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskpaintError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`MaskpaintError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }
}

impl From<zip::result::ZipError> for MaskpaintError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
