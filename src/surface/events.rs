use anyhow::Context;

use crate::{
    foundation::core::Point,
    foundation::error::MaskpaintResult,
    surface::drawing::{DrawingSurface, StrokeOutcome},
};

/// Pointer input in canvas-local pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer left the canvas; ends the stroke like `Up`.
    Leave,
}

/// One scripted user action, as stored in a JSON action list.
///
/// ```json
/// [{ "kind": "down", "x": 10, "y": 10 }, { "kind": "move", "x": 10, "y": 50 }, { "kind": "up" }]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceAction {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Undo,
    Reset,
    ZoomIn,
    ZoomOut,
}

impl SurfaceAction {
    pub fn parse_list(json: &str) -> MaskpaintResult<Vec<Self>> {
        let actions = serde_json::from_str::<Vec<Self>>(json).context("parse surface action list")?;
        Ok(actions)
    }

    /// Down at the first point, a move per remaining point, then up.
    pub fn trace(points: &[(f64, f64)]) -> Vec<Self> {
        let Some((&(x, y), rest)) = points.split_first() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(points.len() + 1);
        out.push(Self::Down { x, y });
        out.extend(rest.iter().map(|&(x, y)| Self::Move { x, y }));
        out.push(Self::Up);
        out
    }
}

impl DrawingSurface {
    /// Returns the stroke outcome for `Up`/`Leave`, `None` otherwise.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<StrokeOutcome> {
        match event {
            PointerEvent::Down(p) => {
                self.begin_stroke(p);
                None
            }
            PointerEvent::Move(p) => {
                self.extend_stroke(p);
                None
            }
            PointerEvent::Up | PointerEvent::Leave => Some(self.end_stroke()),
        }
    }

    pub fn apply(&mut self, action: SurfaceAction) -> Option<StrokeOutcome> {
        match action {
            SurfaceAction::Down { x, y } => self.handle_pointer(PointerEvent::Down(Point::new(x, y))),
            SurfaceAction::Move { x, y } => self.handle_pointer(PointerEvent::Move(Point::new(x, y))),
            SurfaceAction::Up => self.handle_pointer(PointerEvent::Up),
            SurfaceAction::Leave => self.handle_pointer(PointerEvent::Leave),
            SurfaceAction::Undo => {
                self.undo_last();
                None
            }
            SurfaceAction::Reset => {
                self.reset();
                None
            }
            SurfaceAction::ZoomIn => {
                self.zoom_in();
                None
            }
            SurfaceAction::ZoomOut => {
                self.zoom_out();
                None
            }
        }
    }

    /// Apply actions in order, collecting the outcome of every finished stroke.
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = SurfaceAction>) -> Vec<StrokeOutcome> {
        actions
            .into_iter()
            .filter_map(|a| self.apply(a))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/events.rs"]
mod tests;
