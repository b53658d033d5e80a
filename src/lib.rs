//! maskpaint is a freehand region-labeling engine.
//!
//! A user draws strokes over a base image; strokes whose end returns close to
//! their start are accepted as labeled regions. The accepted strokes can be
//! exported as the annotated image plus a binary mask, packaged in a zip.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode a PNG (or a zip of PNGs) into a [`BaseImage`] held in memory
//! 2. **Draw**: feed pointer events to a [`DrawingSurface`]; each finished stroke is
//!    accepted into the [`StrokeSet`] or discarded by the [`ClosurePolicy`]
//! 3. **Project**: [`DrawingSurface::canvas`] renders (image, strokes) through a
//!    [`SurfaceRenderer`] ([`CpuRenderer`] by default)
//! 4. **Export**: [`export_labels`] rasterizes the annotated image and the mask and
//!    packages both as an [`ExportArchive`]
//!
//! The stroke set is the model; pixels are always a pure function of it. Zoom
//! ([`ViewState`]) is presentation only and never touches stroke coordinates.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod export;
mod foundation;
mod render;
mod session;
mod stroke;
mod surface;
mod view;

pub use assets::archive::{ImageBundle, is_png_entry};
pub use assets::decode::{BaseImage, ImageId, decode_image};
pub use config::LabelConfig;
pub use export::encode::{MASK_ALPHA_CUTOFF, binarize_mask, encode_png};
pub use export::package::{ExportArchive, ExportOptions, package_archive};
pub use export::rasterize::{ExportRasters, export_labels, package_rasters, rasterize_labels};
pub use foundation::core::{BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{MaskpaintError, MaskpaintResult};
pub use render::backend::{FrameRGBA, RenderMode, Scene, StrokeStyle, SurfaceRenderer, stroke_path};
pub use render::cpu::CpuRenderer;
pub use session::LabelSession;
pub use stroke::closure::{ClosureDecision, ClosurePolicy, DEFAULT_CLOSURE_THRESHOLD_PX};
pub use stroke::store::{Stroke, StrokeSet};
pub use surface::drawing::{DrawingSurface, StrokeOutcome};
pub use surface::events::{PointerEvent, SurfaceAction};
pub use view::state::{Overflow, ViewState, ZoomConfig};
