use crate::{
    foundation::core::{Canvas, Point},
    foundation::error::{MaskpaintError, MaskpaintResult},
};

/// Bounds and increment for discrete zoom levels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 3.0,
            step: 0.5,
        }
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> MaskpaintResult<()> {
        let finite = self.min_scale.is_finite() && self.max_scale.is_finite() && self.step.is_finite();
        if !finite || self.min_scale <= 0.0 {
            return Err(MaskpaintError::validation(format!(
                "zoom min_scale must be finite and > 0, got {}",
                self.min_scale
            )));
        }
        if self.max_scale < self.min_scale {
            return Err(MaskpaintError::validation(format!(
                "zoom max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.step <= 0.0 {
            return Err(MaskpaintError::validation(format!(
                "zoom step must be > 0, got {}",
                self.step
            )));
        }
        Ok(())
    }

    // Number of steps needed to reach max_scale; the last one may be clamped.
    fn max_level(&self) -> u32 {
        let span = (self.max_scale - self.min_scale) / self.step;
        (span - 1e-9).ceil().max(0.0) as u32
    }
}

/// Whether the viewport scrolls or clips the scaled canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    Hidden,
    Scroll,
}

/// Presentation zoom. Never affects stroke coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    zoom: ZoomConfig,
    level: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ViewState {
    pub fn new(zoom: ZoomConfig) -> Self {
        Self { zoom, level: 0 }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.zoom
    }

    pub fn scale(&self) -> f64 {
        let raw = self.zoom.min_scale + self.zoom.step * f64::from(self.level);
        raw.min(self.zoom.max_scale)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level < self.zoom.max_level()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > 0
    }

    pub fn overflow(&self) -> Overflow {
        if self.level > 0 {
            Overflow::Scroll
        } else {
            Overflow::Hidden
        }
    }

    /// Steps the scale up; returns false when already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.level += 1;
        tracing::trace!(scale = self.scale(), "zoom in");
        true
    }

    /// Steps the scale down; returns false when already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.level -= 1;
        tracing::trace!(scale = self.scale(), "zoom out");
        true
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }

    /// Size of the canvas on screen at the current scale.
    pub fn display_size(&self, canvas: Canvas) -> (f64, f64) {
        let s = self.scale();
        (f64::from(canvas.width) * s, f64::from(canvas.height) * s)
    }

    /// Maps a point in scaled display space back to canvas pixels.
    pub fn to_canvas(&self, display: Point) -> Point {
        let s = self.scale();
        Point::new(display.x / s, display.y / s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/state.rs"]
mod tests;
