use crate::{
    assets::decode::BaseImage,
    config::LabelConfig,
    export::rasterize::{ExportRasters, rasterize_labels},
    foundation::core::{Canvas, Point},
    foundation::error::{MaskpaintError, MaskpaintResult},
    render::backend::{FrameRGBA, RenderMode, Scene, StrokeStyle, SurfaceRenderer},
    render::cpu::CpuRenderer,
    stroke::closure::{ClosureDecision, ClosurePolicy},
    stroke::store::{Stroke, StrokeSet},
    view::state::ViewState,
};

/// What `end_stroke` did with the in-progress stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeOutcome {
    /// No stroke was in progress.
    Idle,
    /// Stroke closed within the threshold and now lives at `index` in the set.
    Accepted { index: usize, gap: f64 },
    /// Endpoints too far apart; the stroke was discarded.
    Rejected { gap: f64 },
    /// Fewer samples than the closure policy requires; discarded.
    TooFewPoints { points: usize },
}

impl StrokeOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// A stroke was finished but did not make it into the set.
    pub fn is_discarded(self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::TooFewPoints { .. })
    }
}

/// Interactive labeling surface bound to one base image.
///
/// The accepted [`StrokeSet`] is the model. The visible canvas is a projection
/// of (base image, stroke set, in-progress points) and is re-rendered on demand
/// after every mutation, so two histories ending in the same stroke set always
/// produce identical pixels.
pub struct DrawingSurface {
    policy: ClosurePolicy,
    style: StrokeStyle,
    image: Option<BaseImage>,
    strokes: StrokeSet,
    current: Option<Stroke>,
    view: ViewState,
    renderer: Box<dyn SurfaceRenderer>,
    canvas: Option<FrameRGBA>,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("image", &self.image.as_ref().map(BaseImage::name))
            .field("strokes", &self.strokes.len())
            .field("drawing", &self.current.is_some())
            .field("scale", &self.view.scale())
            .finish()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(&LabelConfig::default())
    }
}

impl DrawingSurface {
    pub fn new(config: &LabelConfig) -> Self {
        Self::with_renderer(config, Box::new(CpuRenderer::new()))
    }

    pub fn with_renderer(config: &LabelConfig, renderer: Box<dyn SurfaceRenderer>) -> Self {
        Self {
            policy: config.closure,
            style: config.style,
            image: None,
            strokes: StrokeSet::new(),
            current: None,
            view: ViewState::new(config.zoom),
            renderer,
            canvas: None,
        }
    }

    /// Bind `image`, sizing the canvas to it. Strokes, zoom and any in-progress
    /// stroke from the previous image are discarded.
    #[tracing::instrument(skip_all, fields(name = image.name(), width = image.width(), height = image.height()))]
    pub fn load_image(&mut self, image: BaseImage) {
        self.image = Some(image);
        self.strokes.clear();
        self.current = None;
        self.view.reset();
        self.invalidate();
    }

    /// Drop the image. Pointer input is ignored until the next `load_image`.
    pub fn unload(&mut self) {
        self.image = None;
        self.strokes.clear();
        self.current = None;
        self.view.reset();
        self.invalidate();
    }

    pub fn image(&self) -> Option<&BaseImage> {
        self.image.as_ref()
    }

    pub fn canvas_size(&self) -> Option<Canvas> {
        self.image.as_ref().map(BaseImage::canvas)
    }

    pub fn strokes(&self) -> &StrokeSet {
        &self.strokes
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn policy(&self) -> &ClosurePolicy {
        &self.policy
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Start a stroke at `p`. Returns false when no image is loaded.
    ///
    /// A stroke already in progress is dropped in favour of the new one.
    pub fn begin_stroke(&mut self, p: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        if let Some(prev) = self.current.take() {
            tracing::debug!(points = prev.len(), "dropping unfinished stroke");
        }
        self.current = Some(Stroke::starting_at(p));
        self.invalidate();
        true
    }

    pub fn extend_stroke(&mut self, p: Point) {
        let Some(stroke) = self.current.as_mut() else {
            return;
        };
        stroke.push(p);
        self.invalidate();
    }

    pub fn end_stroke(&mut self) -> StrokeOutcome {
        let Some(stroke) = self.current.take() else {
            return StrokeOutcome::Idle;
        };
        self.invalidate();

        match self.policy.decide(stroke.points()) {
            ClosureDecision::Closed { gap } => {
                let points = stroke.len();
                let index = self.strokes.push(stroke);
                tracing::debug!(index, points, gap, "stroke accepted");
                StrokeOutcome::Accepted { index, gap }
            }
            ClosureDecision::Open { gap } => {
                tracing::debug!(
                    points = stroke.len(),
                    gap,
                    threshold = self.policy.threshold_px,
                    "stroke rejected: not closed"
                );
                StrokeOutcome::Rejected { gap }
            }
            ClosureDecision::TooFewPoints { points } => {
                tracing::debug!(points, "stroke rejected: too few points");
                StrokeOutcome::TooFewPoints { points }
            }
        }
    }

    /// Remove the most recent accepted stroke. Returns false on an empty set.
    pub fn undo_last(&mut self) -> bool {
        let Some(removed) = self.strokes.pop() else {
            return false;
        };
        tracing::debug!(
            points = removed.len(),
            remaining = self.strokes.len(),
            "undo last stroke"
        );
        self.invalidate();
        true
    }

    pub fn reset(&mut self) {
        tracing::debug!(cleared = self.strokes.len(), "reset strokes");
        self.strokes.clear();
        self.invalidate();
    }

    /// Returns the new scale. Rendering is unaffected; zoom is presentation only.
    pub fn zoom_in(&mut self) -> f64 {
        self.view.zoom_in();
        self.view.scale()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.view.zoom_out();
        self.view.scale()
    }

    /// Current visible canvas, re-rendered if anything changed since the last call.
    /// `None` when no image is loaded.
    pub fn canvas(&mut self) -> MaskpaintResult<Option<&FrameRGBA>> {
        if self.image.is_none() {
            return Ok(None);
        }
        if self.canvas.is_none() {
            let in_progress = self.current.as_ref().map(Stroke::points);
            let frame = render_scene(
                self.renderer.as_mut(),
                self.image.as_ref(),
                &self.strokes,
                in_progress,
                &self.style,
                RenderMode::Annotated,
            )?;
            self.canvas = Some(frame);
        }
        Ok(self.canvas.as_ref())
    }

    /// Rasterize the committed state (no in-progress stroke) for export,
    /// without touching the cached canvas.
    pub(crate) fn rasterize_committed(&mut self, binarize: bool) -> MaskpaintResult<ExportRasters> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| MaskpaintError::validation("no image loaded"))?;
        rasterize_labels(
            self.renderer.as_mut(),
            image,
            &self.strokes,
            &self.style,
            binarize,
        )
    }

    fn invalidate(&mut self) {
        self.canvas = None;
    }
}

fn render_scene(
    renderer: &mut dyn SurfaceRenderer,
    image: Option<&BaseImage>,
    strokes: &StrokeSet,
    in_progress: Option<&[Point]>,
    style: &StrokeStyle,
    mode: RenderMode,
) -> MaskpaintResult<FrameRGBA> {
    let image = image.ok_or_else(|| MaskpaintError::validation("no image loaded"))?;
    renderer.render(&Scene {
        canvas: image.canvas(),
        mode,
        image: (mode == RenderMode::Annotated).then_some(image),
        strokes,
        in_progress,
        style,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/drawing.rs"]
mod tests;
