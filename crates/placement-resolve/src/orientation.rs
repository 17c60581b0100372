//! Right-hand-rule validation and default orientation derivation.
//!
//! A placed instance's frame is the (facing, hand, normal) triple. The
//! validity predicate used throughout is
//! `is_right_handed(hand, facing, normal)`: the hand takes the thumb
//! slot, the facing the index slot and the face normal the middle
//! slot. [`repair_index`] produces a replacement hand from the facing
//! and normal when the extracted one violates the rule.
//!
//! Orientation is advisory. When repair is impossible (the facing and
//! normal themselves are not orthogonal), the degraded frame is still
//! returned so the caller has something to place with.

use nalgebra::Vector3;
use tracing::warn;

use placement_types::{EdgeLoop, FaceRef, OrientationFrame, SceneQuery, MIN_LENGTH};

use crate::directions::main_directions;
use crate::error::{PlacementError, PlacementResult};

/// Whether three vectors are mutually orthogonal and right-handed.
///
/// All three pairwise dot products must be within `tolerance` of zero;
/// a non-orthogonal triple is rejected outright, with no attempt at
/// partial repair. For an orthogonal triple,
/// `cross(index, middle) · thumb` must exceed `tolerance` (strictly
/// positive beyond tolerance, not merely non-negative).
///
/// # Example
///
/// ```
/// use placement_resolve::orientation::is_right_handed;
/// use nalgebra::Vector3;
///
/// let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
/// assert!(is_right_handed(&x, &y, &z, 1e-6));
/// // Swapping index and middle mirrors the triple.
/// assert!(!is_right_handed(&x, &z, &y, 1e-6));
/// ```
#[must_use]
pub fn is_right_handed(
    thumb: &Vector3<f64>,
    index: &Vector3<f64>,
    middle: &Vector3<f64>,
    tolerance: f64,
) -> bool {
    let orthogonal = thumb.dot(index).abs() <= tolerance
        && thumb.dot(middle).abs() <= tolerance
        && index.dot(middle).abs() <= tolerance;
    if !orthogonal {
        return false;
    }
    index.cross(middle).dot(thumb) > tolerance
}

/// Derive the index direction completing a right-handed triple from
/// the thumb and middle directions.
///
/// Both inputs are normalized first; `None` if either is near zero or
/// if they are not orthogonal within `tolerance` (repair from
/// non-orthogonal inputs is not attempted). The result is the
/// negated, normalized `cross(middle, thumb)`, which is orthogonal to
/// both inputs by construction.
#[must_use]
pub fn repair_index(
    thumb: &Vector3<f64>,
    middle: &Vector3<f64>,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let thumb = thumb.try_normalize(MIN_LENGTH)?;
    let middle = middle.try_normalize(MIN_LENGTH)?;
    if thumb.dot(&middle).abs() > tolerance {
        return None;
    }
    (-middle.cross(&thumb)).try_normalize(MIN_LENGTH)
}

/// Derive a default orientation frame from a face's outer boundary and
/// normal.
///
/// The heaviest boundary axis becomes the facing direction and the
/// second-heaviest the hand direction. If the resulting triple fails
/// `is_right_handed(hand, facing, normal)`, the hand is replaced by
/// `repair_index(facing, normal)`; when even that is impossible, the
/// unrepaired best-effort frame is returned rather than an error.
///
/// # Errors
///
/// Propagates direction-extraction failures
/// ([`PlacementError::InsufficientGeometry`],
/// [`PlacementError::DegenerateDirection`]).
pub fn orientation_from_boundary(
    boundary: &EdgeLoop,
    face_normal: &Vector3<f64>,
    tolerance: f64,
) -> PlacementResult<OrientationFrame> {
    let dirs = main_directions(boundary, face_normal)?;
    let facing = dirs.primary;
    let mut hand = dirs.secondary;

    if !is_right_handed(&hand, &facing, face_normal, tolerance) {
        match repair_index(&facing, face_normal, tolerance) {
            Some(repaired) => hand = repaired,
            None => warn!(
                ?facing,
                normal = ?face_normal,
                "orientation repair impossible; returning best-effort frame"
            ),
        }
    }

    Ok(OrientationFrame::new(facing, hand, *face_normal))
}

/// Derive a default orientation frame for a face in the scene.
///
/// Reads the face's outer loop and normal through the scene capability
/// and delegates to [`orientation_from_boundary`].
///
/// # Errors
///
/// [`PlacementError::FaceUnavailable`] when the scene cannot produce
/// the face's boundary or normal, plus anything
/// [`orientation_from_boundary`] reports.
pub fn default_orientation<S: SceneQuery>(
    scene: &S,
    face: FaceRef,
    tolerance: f64,
) -> PlacementResult<OrientationFrame> {
    let loops = scene.face_loops(face);
    // First loop is the outer boundary; holes are ignored.
    let outer = loops
        .first()
        .ok_or(PlacementError::FaceUnavailable(face))?;
    let normal = scene
        .face_normal(face)
        .ok_or(PlacementError::FaceUnavailable(face))?;
    orientation_from_boundary(outer, &normal, tolerance)
}
