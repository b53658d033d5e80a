use std::{cell::RefCell, rc::Rc};

use super::*;

#[derive(Clone, Debug, PartialEq)]
struct SceneRecord {
    mode: RenderMode,
    has_image: bool,
    strokes: Vec<Vec<Point>>,
    in_progress: Option<Vec<Point>>,
}

#[derive(Default)]
struct RecordingRenderer {
    log: Rc<RefCell<Vec<SceneRecord>>>,
}

impl SurfaceRenderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene<'_>) -> MaskpaintResult<FrameRGBA> {
        self.log.borrow_mut().push(SceneRecord {
            mode: scene.mode,
            has_image: scene.image.is_some(),
            strokes: scene.strokes.iter().map(<[Point]>::to_vec).collect(),
            in_progress: scene.in_progress.map(<[Point]>::to_vec),
        });
        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: vec![0; scene.canvas.rgba8_len()],
            premultiplied: true,
        })
    }
}

fn recording_surface() -> (DrawingSurface, Rc<RefCell<Vec<SceneRecord>>>) {
    let renderer = RecordingRenderer::default();
    let log = Rc::clone(&renderer.log);
    let surface = DrawingSurface::with_renderer(&LabelConfig::default(), Box::new(renderer));
    (surface, log)
}

fn image(name: &str) -> BaseImage {
    BaseImage::from_rgba8(name, 200, 200, vec![255; 200 * 200 * 4]).unwrap()
}

fn draw(surface: &mut DrawingSurface, points: &[(f64, f64)]) -> StrokeOutcome {
    let (first, rest) = points.split_first().unwrap();
    surface.begin_stroke(Point::new(first.0, first.1));
    for &(x, y) in rest {
        surface.extend_stroke(Point::new(x, y));
    }
    surface.end_stroke()
}

const CLOSED: &[(f64, f64)] = &[(10.0, 10.0), (10.0, 50.0), (50.0, 50.0), (50.0, 10.0), (12.0, 11.0)];
const OPEN: &[(f64, f64)] = &[(100.0, 100.0), (150.0, 100.0), (100.0, 150.0)];

#[test]
fn pointer_input_is_inert_without_image() {
    let (mut s, log) = recording_surface();
    assert!(!s.begin_stroke(Point::new(1.0, 1.0)));
    s.extend_stroke(Point::new(2.0, 2.0));
    assert_eq!(s.end_stroke(), StrokeOutcome::Idle);
    assert!(s.strokes().is_empty());
    assert!(s.canvas().unwrap().is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn closed_stroke_is_accepted_and_open_stroke_rejected() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));

    let outcome = draw(&mut s, CLOSED);
    assert!(matches!(outcome, StrokeOutcome::Accepted { index: 0, .. }));
    assert_eq!(s.strokes().len(), 1);

    match draw(&mut s, OPEN) {
        StrokeOutcome::Rejected { gap } => assert!((gap - 50.0).abs() < 1e-9),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(s.strokes().len(), 1);
    assert!(!s.is_drawing());
}

#[test]
fn extend_and_end_without_begin_are_ignored() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));
    s.extend_stroke(Point::new(3.0, 3.0));
    assert!(s.in_progress().is_none());
    assert_eq!(s.end_stroke(), StrokeOutcome::Idle);
    assert!(s.strokes().is_empty());
}

#[test]
fn single_click_is_a_degenerate_accepted_stroke_by_default() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));
    assert!(draw(&mut s, &[(5.0, 5.0)]).is_accepted());
    assert_eq!(s.strokes().get(0).unwrap(), &[Point::new(5.0, 5.0)]);

    let cfg = LabelConfig {
        closure: ClosurePolicy {
            min_points: 2,
            ..ClosurePolicy::default()
        },
        ..LabelConfig::default()
    };
    let mut strict = DrawingSurface::with_renderer(&cfg, Box::new(RecordingRenderer::default()));
    strict.load_image(image("a.png"));
    assert_eq!(
        draw(&mut strict, &[(5.0, 5.0)]),
        StrokeOutcome::TooFewPoints { points: 1 }
    );
    assert!(strict.strokes().is_empty());
}

#[test]
fn begin_while_drawing_restarts_the_stroke() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));
    s.begin_stroke(Point::new(0.0, 0.0));
    s.extend_stroke(Point::new(90.0, 90.0));
    s.begin_stroke(Point::new(20.0, 20.0));
    assert_eq!(s.in_progress().unwrap().points(), &[Point::new(20.0, 20.0)]);
}

#[test]
fn undo_removes_only_the_last_stroke() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));
    draw(&mut s, CLOSED);
    draw(&mut s, &[(60.0, 60.0), (90.0, 60.0), (90.0, 90.0), (61.0, 61.0)]);
    let first = s.strokes().get(0).unwrap().to_vec();

    assert!(s.undo_last());
    assert_eq!(s.strokes().len(), 1);
    assert_eq!(s.strokes().get(0).unwrap(), first.as_slice());

    assert!(s.undo_last());
    assert!(!s.undo_last());
    assert!(s.strokes().is_empty());
}

#[test]
fn reset_and_reload_clear_strokes_and_zoom() {
    let (mut s, _) = recording_surface();
    s.load_image(image("a.png"));
    draw(&mut s, CLOSED);
    s.reset();
    assert!(s.strokes().is_empty());

    draw(&mut s, CLOSED);
    s.zoom_in();
    s.begin_stroke(Point::new(1.0, 1.0));
    s.load_image(image("b.png"));
    assert!(s.strokes().is_empty());
    assert!(!s.is_drawing());
    assert_eq!(s.view().scale(), 1.0);
    assert_eq!(s.image().unwrap().name(), "b.png");
}

#[test]
fn canvas_projects_model_and_caches_until_mutation() {
    let (mut s, log) = recording_surface();
    s.load_image(image("a.png"));
    s.canvas().unwrap();
    s.canvas().unwrap();
    assert_eq!(log.borrow().len(), 1);

    s.begin_stroke(Point::new(10.0, 10.0));
    s.extend_stroke(Point::new(10.0, 50.0));
    s.canvas().unwrap();
    {
        let log = log.borrow();
        let last = log.last().unwrap();
        assert_eq!(last.mode, RenderMode::Annotated);
        assert!(last.has_image);
        assert!(last.strokes.is_empty());
        assert_eq!(
            last.in_progress.as_deref(),
            Some(&[Point::new(10.0, 10.0), Point::new(10.0, 50.0)][..])
        );
    }

    s.end_stroke();
    s.canvas().unwrap();
    let log = log.borrow();
    let last = log.last().unwrap();
    assert!(last.in_progress.is_none());
    assert!(last.strokes.is_empty());
    assert_eq!(log.len(), 3);
}

#[test]
fn zoom_does_not_rerender_or_touch_strokes() {
    let (mut s, log) = recording_surface();
    s.load_image(image("a.png"));
    draw(&mut s, CLOSED);
    s.canvas().unwrap();
    let before = s.strokes().clone();

    assert_eq!(s.zoom_in(), 1.5);
    assert_eq!(s.zoom_in(), 2.0);
    assert_eq!(s.zoom_out(), 1.5);
    s.canvas().unwrap();

    assert_eq!(log.borrow().len(), 1);
    assert_eq!(s.strokes(), &before);
}

#[test]
fn committed_render_excludes_in_progress_and_keeps_cache() {
    let (mut s, log) = recording_surface();
    assert!(s.rasterize_committed(false).is_err());

    s.load_image(image("a.png"));
    draw(&mut s, CLOSED);
    s.begin_stroke(Point::new(1.0, 1.0));
    s.canvas().unwrap();

    s.rasterize_committed(false).unwrap();
    s.canvas().unwrap();
    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(log[1].mode, RenderMode::Annotated);
    assert!(log[1].has_image);
    assert_eq!(log[2].mode, RenderMode::Mask);
    assert!(!log[2].has_image);
    assert!(log[1].in_progress.is_none() && log[2].in_progress.is_none());
    assert_eq!(log[2].strokes.len(), 1);
}
