use std::ops::Range;

use crate::foundation::core::Point;

/// Ordered pointer samples recorded between a press and a release.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn starting_at(p: Point) -> Self {
        Self { points: vec![p] }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Euclidean distance between the first and last sample.
    pub fn closure_gap(&self) -> Option<f64> {
        closure_gap(&self.points)
    }
}

pub(crate) fn closure_gap(points: &[Point]) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    Some(first.distance(*last))
}

/// Accepted strokes for one image, in z-order.
///
/// Strokes are stored as spans into one flat point buffer. Only the most recent
/// stroke can be removed, so spans stay contiguous and `pop` is a truncate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeSet {
    points: Vec<Point>,
    spans: Vec<Range<usize>>,
}

impl StrokeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of strokes.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Appends `stroke` on top and returns its index.
    pub fn push(&mut self, stroke: Stroke) -> usize {
        let start = self.points.len();
        self.points.extend(stroke.points);
        self.spans.push(start..self.points.len());
        self.spans.len() - 1
    }

    /// Removes and returns the most recent stroke.
    pub fn pop(&mut self) -> Option<Stroke> {
        let span = self.spans.pop()?;
        let points = self.points.split_off(span.start);
        Some(Stroke { points })
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.spans.clear();
    }

    pub fn get(&self, index: usize) -> Option<&[Point]> {
        let span = self.spans.get(index)?;
        Some(&self.points[span.clone()])
    }

    pub fn last(&self) -> Option<&[Point]> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Point slices in z-order (first accepted is drawn first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[Point]> + ExactSizeIterator + '_ {
        self.spans.iter().map(|span| &self.points[span.clone()])
    }

    pub fn to_strokes(&self) -> Vec<Stroke> {
        self.iter()
            .map(|pts| Stroke::from_points(pts.iter().copied()))
            .collect()
    }
}

impl FromIterator<Stroke> for StrokeSet {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        let mut set = Self::new();
        for stroke in iter {
            set.push(stroke);
        }
        set
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/store.rs"]
mod tests;
