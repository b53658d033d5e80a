use crate::{
    foundation::core::Point,
    foundation::error::{MaskpaintError, MaskpaintResult},
    stroke::store::closure_gap,
};

/// Default maximum start-to-end distance, in canvas pixels, for a closed stroke.
pub const DEFAULT_CLOSURE_THRESHOLD_PX: f64 = 10.0;

/// Rule deciding whether a finished stroke encloses a region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClosurePolicy {
    /// Inclusive upper bound on the first-to-last point distance.
    pub threshold_px: f64,
    /// Strokes with fewer samples are rejected before the distance test.
    /// The default of 1 accepts a click without movement as a degenerate region.
    pub min_points: usize,
}

impl Default for ClosurePolicy {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_CLOSURE_THRESHOLD_PX,
            min_points: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClosureDecision {
    Closed { gap: f64 },
    Open { gap: f64 },
    TooFewPoints { points: usize },
}

impl ClosureDecision {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

impl ClosurePolicy {
    pub fn decide(&self, points: &[Point]) -> ClosureDecision {
        if points.len() < self.min_points.max(1) {
            return ClosureDecision::TooFewPoints {
                points: points.len(),
            };
        }
        match closure_gap(points) {
            Some(gap) if gap <= self.threshold_px => ClosureDecision::Closed { gap },
            Some(gap) => ClosureDecision::Open { gap },
            None => ClosureDecision::TooFewPoints { points: 0 },
        }
    }

    pub fn validate(&self) -> MaskpaintResult<()> {
        if !self.threshold_px.is_finite() || self.threshold_px < 0.0 {
            return Err(MaskpaintError::validation(format!(
                "closure threshold must be a finite non-negative distance, got {}",
                self.threshold_px
            )));
        }
        if self.min_points == 0 {
            return Err(MaskpaintError::validation("closure min_points must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/closure.rs"]
mod tests;
