//! Boundary geometry: line segments and closed edge loops.
//!
//! A face exposes its boundary as one or more [`EdgeLoop`]s. By
//! convention of the host document, the first loop is the outer
//! boundary; any further loops are holes and are ignored by the
//! placement algorithms.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum magnitude below which a vector cannot be normalized.
///
/// Edges shorter than this are treated as degenerate artifacts
/// (coincident vertices, numerical noise) and discarded.
pub const MIN_LENGTH: f64 = 1e-10;

/// A straight segment between two points.
///
/// Used both as a single boundary edge of a face and as a location
/// line for curve-based placement.
///
/// # Example
///
/// ```
/// use placement_types::Segment;
/// use nalgebra::Point3;
///
/// let seg = Segment::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0));
/// assert!((seg.length() - 4.0).abs() < 1e-12);
/// assert!((seg.midpoint().x - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Start point.
    pub start: Point3<f64>,
    /// End point.
    pub end: Point3<f64>,
}

impl Segment {
    /// Create a segment from its endpoints.
    #[must_use]
    pub const fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// The vector from start to end (not normalized).
    #[must_use]
    pub fn vector(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// The length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// The unit direction from start to end.
    ///
    /// Returns `None` for segments shorter than [`MIN_LENGTH`].
    #[must_use]
    pub fn direction(&self) -> Option<Vector3<f64>> {
        self.vector().try_normalize(MIN_LENGTH)
    }

    /// The point halfway between start and end.
    #[must_use]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// The segment with start and end swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

/// An ordered sequence of segments forming one closed face boundary.
///
/// The loop does not enforce closure; it stores whatever the scene
/// reports. Degenerate (near zero-length) segments are kept here and
/// filtered by the consuming algorithms.
///
/// # Example
///
/// ```
/// use placement_types::EdgeLoop;
/// use nalgebra::Point3;
///
/// let rect = EdgeLoop::from_points(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
///     Point3::new(4.0, 2.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ]);
/// assert_eq!(rect.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeLoop {
    segments: Vec<Segment>,
}

impl EdgeLoop {
    /// Create a loop from an ordered list of segments.
    #[must_use]
    pub const fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Create a closed loop from an ordered list of corner points.
    ///
    /// Consecutive points become segments, and a final segment connects
    /// the last point back to the first. Fewer than two points yield an
    /// empty loop.
    #[must_use]
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }
        let mut segments = Vec::with_capacity(points.len());
        for pair in points.windows(2) {
            segments.push(Segment::new(pair[0], pair[1]));
        }
        // Close the loop.
        if let (Some(last), Some(first)) = (points.last(), points.first()) {
            segments.push(Segment::new(*last, *first));
        }
        Self { segments }
    }

    /// The segments of the loop, in boundary order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the loop has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Total length of all segments.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

impl From<Vec<Segment>> for EdgeLoop {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_vector_and_length() {
        let seg = Segment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 2.0, 3.0));
        assert_eq!(seg.vector(), Vector3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(seg.length(), 3.0);
    }

    #[test]
    fn test_segment_direction_normalized() {
        let seg = Segment::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
        let dir = seg.direction().unwrap();
        assert_relative_eq!(dir.norm(), 1.0);
        assert_relative_eq!(dir.x, 0.6);
        assert_relative_eq!(dir.y, 0.8);
    }

    #[test]
    fn test_segment_direction_degenerate() {
        let p = Point3::new(5.0, 5.0, 5.0);
        let seg = Segment::new(p, p);
        assert!(seg.direction().is_none());
    }

    #[test]
    fn test_segment_midpoint_and_reverse() {
        let seg = Segment::new(Point3::origin(), Point3::new(2.0, 4.0, 6.0));
        assert_eq!(seg.midpoint(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(seg.reversed().start, seg.end);
    }

    #[test]
    fn test_loop_from_points_closes() {
        let rect = EdgeLoop::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]);
        assert_eq!(rect.len(), 4);
        let last = rect.segments().last().unwrap();
        assert_eq!(last.start, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(last.end, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(rect.perimeter(), 12.0);
    }

    #[test]
    fn test_loop_from_too_few_points() {
        let single = EdgeLoop::from_points(&[Point3::origin()]);
        assert!(single.is_empty());
    }
}
