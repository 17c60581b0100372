//! Six-ray proximity search for host faces and host elements.
//!
//! # Algorithm
//!
//! A ray is cast from the query point along each of the six axis
//! directions (+X, -X, +Y, -Y, +Z, -Z). Every intersection with
//! geometry matching the candidate filter (including geometry in
//! externally referenced sub-documents) is considered, and the single
//! globally closest hit within the search radius wins.
//!
//! # Limitation
//!
//! This is a six-ray approximation of "nearest supporting geometry",
//! not a true nearest-point search. A host reachable only along a
//! non-axis-aligned approach vector will be missed even when it is
//! closer than an axis-aligned candidate. The approximation is cheap
//! and good enough for axis-aligned insertion scenarios, which is all
//! the callers need.

use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use placement_types::{
    ElementClass, ElementId, FaceRef, HitTarget, HostKind, RayTarget, SceneQuery, ViewId,
};

use crate::error::{PlacementError, PlacementResult};
use crate::params::MM_PER_FOOT;

/// The six axis-aligned ray directions, in cast order.
///
/// The order is fixed; among equally distant hits the first encountered
/// wins, so callers get a stable (but not semantically meaningful)
/// tie-break.
pub const AXIS_DIRECTIONS: [Vector3<f64>; 6] = [
    Vector3::new(1.0, 0.0, 0.0),
    Vector3::new(-1.0, 0.0, 0.0),
    Vector3::new(0.0, 1.0, 0.0),
    Vector3::new(0.0, -1.0, 0.0),
    Vector3::new(0.0, 0.0, 1.0),
    Vector3::new(0.0, 0.0, -1.0),
];

/// Element classes considered when searching for a host face.
pub const FACE_SEARCH_CLASSES: [ElementClass; 4] = [
    ElementClass::Wall,
    ElementClass::Floor,
    ElementClass::Ceiling,
    ElementClass::FamilyInstance,
];

/// Upward nudge applied to the face-search origin (0.1 mm in feet).
///
/// Keeps a point lying exactly on a floor from starting infinitesimally
/// below it. The element search applies no nudge.
pub const ORIGIN_LIFT: f64 = 0.1 / MM_PER_FOOT;

/// A host found by proximity search.
///
/// The reference is an opaque handle into the caller's scene graph;
/// this crate only compares distances, the caller owns the underlying
/// geometry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HostCandidate<R> {
    /// The face or element that was found.
    pub reference: R,
    /// Distance from the query point, in feet.
    pub distance: f64,
}

impl<R> HostCandidate<R> {
    /// Create a candidate.
    #[must_use]
    pub const fn new(reference: R, distance: f64) -> Self {
        Self {
            reference,
            distance,
        }
    }
}

/// Find the face closest to `origin` within `radius`.
///
/// The origin is lifted by [`ORIGIN_LIFT`] along +Z before casting.
/// Returns `Ok(None)` when no face of the given classes lies within
/// the radius along any of the six axis rays.
///
/// # Errors
///
/// [`PlacementError::NoQueryView`] if no 3D query view exists and one
/// cannot be created.
///
/// # Example
///
/// ```
/// use placement_resolve::proximity::{find_nearest_face, FACE_SEARCH_CLASSES};
/// use placement_types::{ElementClass, ElementId, SyntheticScene};
/// use nalgebra::{Point3, Vector3};
///
/// let mut scene = SyntheticScene::new();
/// let face = scene.add_rect_face(
///     ElementId(1),
///     ElementClass::Wall,
///     Point3::new(2.0, -5.0, -5.0),
///     Vector3::new(0.0, 10.0, 0.0),
///     Vector3::new(0.0, 0.0, 10.0),
/// );
///
/// let found = find_nearest_face(&scene, Point3::origin(), 3.0, &FACE_SEARCH_CLASSES)
///     .unwrap()
///     .unwrap();
/// assert_eq!(found.reference, face);
/// assert!((found.distance - 2.0).abs() < 1e-9);
/// ```
pub fn find_nearest_face<S: SceneQuery>(
    scene: &S,
    origin: Point3<f64>,
    radius: f64,
    classes: &[ElementClass],
) -> PlacementResult<Option<HostCandidate<FaceRef>>> {
    let view = query_view(scene)?;
    let lifted = origin + Vector3::z() * ORIGIN_LIFT;
    let nearest = nearest_hit(scene, view, lifted, radius, RayTarget::Face, classes);
    debug!(
        ?origin,
        radius,
        found = nearest.is_some(),
        "nearest face search"
    );
    Ok(nearest.and_then(|(target, distance)| match target {
        HitTarget::Face(face) => Some(HostCandidate::new(face, distance)),
        HitTarget::Element(_) => None,
    }))
}

/// Find the element of the host kind's class closest to `origin`
/// within `radius`.
///
/// Returns `Ok(None)` when nothing qualifies.
///
/// # Errors
///
/// [`PlacementError::NoQueryView`] if no 3D query view exists and one
/// cannot be created.
pub fn find_nearest_element<S: SceneQuery>(
    scene: &S,
    origin: Point3<f64>,
    radius: f64,
    host_kind: HostKind,
) -> PlacementResult<Option<HostCandidate<ElementId>>> {
    let view = query_view(scene)?;
    let classes = [host_kind.element_class()];
    let nearest = nearest_hit(scene, view, origin, radius, RayTarget::Element, &classes);
    debug!(
        ?origin,
        radius,
        ?host_kind,
        found = nearest.is_some(),
        "nearest host element search"
    );
    Ok(nearest.and_then(|(target, distance)| match target {
        HitTarget::Element(element) => Some(HostCandidate::new(element, distance)),
        HitTarget::Face(_) => None,
    }))
}

/// Reuse an existing non-template 3D view, creating a transient one
/// only when none exists.
pub(crate) fn query_view<S: SceneQuery>(scene: &S) -> PlacementResult<ViewId> {
    scene
        .existing_query_view()
        .or_else(|| scene.create_query_view())
        .ok_or(PlacementError::NoQueryView)
}

/// The globally closest hit across all six axis rays, if any lies
/// within `radius`. Strict `<` comparison keeps the first-encountered
/// hit among equal minima.
fn nearest_hit<S: SceneQuery>(
    scene: &S,
    view: ViewId,
    origin: Point3<f64>,
    radius: f64,
    target: RayTarget,
    classes: &[ElementClass],
) -> Option<(HitTarget, f64)> {
    let mut nearest: Option<(HitTarget, f64)> = None;
    for direction in AXIS_DIRECTIONS {
        for hit in scene.intersect_ray(view, origin, direction, target, classes) {
            if hit.distance > radius {
                continue;
            }
            if nearest.is_none_or(|(_, best)| hit.distance < best) {
                nearest = Some((hit.target, hit.distance));
            }
        }
    }
    nearest
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use placement_types::SyntheticScene;

    /// A wall face in the plane x = `x`, facing -X, spanning 10x10
    /// around the origin.
    fn add_wall_at_x(scene: &mut SyntheticScene, x: f64, element: u64) -> FaceRef {
        scene.add_rect_face(
            ElementId(element),
            ElementClass::Wall,
            Point3::new(x, -5.0, -5.0),
            Vector3::new(0.0, 10.0, 0.0),
            Vector3::new(0.0, 0.0, 10.0),
        )
    }

    /// A floor face in the plane z = `z`, spanning 10x10 around the
    /// origin.
    fn add_floor_at_z(scene: &mut SyntheticScene, z: f64, element: u64) -> FaceRef {
        scene.add_rect_face(
            ElementId(element),
            ElementClass::Floor,
            Point3::new(-5.0, -5.0, z),
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 10.0, 0.0),
        )
    }

    #[test]
    fn test_finds_closest_across_directions() {
        let mut scene = SyntheticScene::new();
        add_wall_at_x(&mut scene, 3.0, 1);
        let near = add_wall_at_x(&mut scene, -1.5, 2);

        let found = find_nearest_face(&scene, Point3::origin(), 5.0, &FACE_SEARCH_CLASSES)
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, near);
        assert_relative_eq!(found.distance, 1.5);
    }

    #[test]
    fn test_radius_excludes_distant_hits() {
        let mut scene = SyntheticScene::new();
        add_wall_at_x(&mut scene, 4.0, 1);

        let found = find_nearest_face(&scene, Point3::origin(), 3.0, &FACE_SEARCH_CLASSES).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_equidistant_hits_yield_one_result() {
        let mut scene = SyntheticScene::new();
        // Two walls exactly 2 ft away in +X and -X.
        let first = add_wall_at_x(&mut scene, 2.0, 1);
        add_wall_at_x(&mut scene, -2.0, 2);

        let found = find_nearest_face(&scene, Point3::origin(), 5.0, &FACE_SEARCH_CLASSES)
            .unwrap()
            .unwrap();
        // +X is cast before -X, so the first-encountered hit wins; the
        // distance is the global minimum either way.
        assert_eq!(found.reference, first);
        assert_relative_eq!(found.distance, 2.0);
    }

    #[test]
    fn test_zero_radius_requires_coincident_face() {
        let mut scene = SyntheticScene::new();
        add_wall_at_x(&mut scene, 1.0, 1);
        let miss = find_nearest_face(&scene, Point3::origin(), 0.0, &FACE_SEARCH_CLASSES).unwrap();
        assert!(miss.is_none());

        // A wall passing exactly through the origin is hit at distance
        // zero even with a zero radius. The +Z origin lift stays inside
        // the wall plane.
        let mut scene = SyntheticScene::new();
        let coincident = add_wall_at_x(&mut scene, 0.0, 2);
        let found = find_nearest_face(&scene, Point3::origin(), 0.0, &FACE_SEARCH_CLASSES)
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, coincident);
        assert_relative_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_origin_lift_applies_to_face_search() {
        let mut scene = SyntheticScene::new();
        add_floor_at_z(&mut scene, 0.0, 1);

        // The query point lies exactly on the floor; the lift puts the
        // ray origin just above it so the -Z ray still finds it.
        let found = find_nearest_face(&scene, Point3::origin(), 1.0, &FACE_SEARCH_CLASSES)
            .unwrap()
            .unwrap();
        assert_relative_eq!(found.distance, ORIGIN_LIFT, max_relative = 1e-12);
    }

    #[test]
    fn test_nearest_element_filters_by_host_kind() {
        let mut scene = SyntheticScene::new();
        add_wall_at_x(&mut scene, 1.0, 1);
        add_floor_at_z(&mut scene, -2.0, 2);

        // A wall-hosted family ignores the nearer floor below.
        let found = find_nearest_element(&scene, Point3::origin(), 5.0, HostKind::Wall)
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, ElementId(1));
        assert_relative_eq!(found.distance, 1.0);

        let found = find_nearest_element(&scene, Point3::origin(), 5.0, HostKind::Floor)
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, ElementId(2));
    }

    #[test]
    fn test_element_search_has_no_origin_lift() {
        let mut scene = SyntheticScene::new();
        add_floor_at_z(&mut scene, 0.0, 1);

        let found = find_nearest_element(&scene, Point3::origin(), 1.0, HostKind::Floor)
            .unwrap()
            .unwrap();
        assert_relative_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_missing_view_is_created_once() {
        let mut scene = SyntheticScene::without_view();
        add_wall_at_x(&mut scene, 1.0, 1);

        find_nearest_face(&scene, Point3::origin(), 5.0, &FACE_SEARCH_CLASSES).unwrap();
        find_nearest_face(&scene, Point3::origin(), 5.0, &FACE_SEARCH_CLASSES).unwrap();
        assert_eq!(scene.views_created(), 1);
    }

    #[test]
    fn test_unavailable_view_is_fatal() {
        let scene = SyntheticScene::without_view_creation();
        let err = find_nearest_face(&scene, Point3::origin(), 5.0, &FACE_SEARCH_CLASSES)
            .unwrap_err();
        assert_eq!(err, PlacementError::NoQueryView);
    }
}
