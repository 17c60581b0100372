//! An in-memory scene for tests and examples.
//!
//! [`SyntheticScene`] implements [`SceneQuery`] over planar rectangular
//! faces, filling the role a live host document plays in production.
//! It exists so the placement algorithms (and downstream users writing
//! their own glue) can be tested without a CAD session, the same way
//! `unit_cube` serves the mesh crates.

use std::cell::Cell;

use nalgebra::{Point3, Vector3};

use crate::{
    EdgeLoop, ElementClass, ElementId, FaceRef, HitTarget, LevelId, RayHit, RayTarget, SceneQuery,
    ViewId,
};

/// Intersection tolerance for the synthetic ray caster.
const EPS: f64 = 1e-9;

/// A planar rectangular face in a [`SyntheticScene`].
///
/// The rectangle spans `origin`, `origin + u`, `origin + u + v`,
/// `origin + v`; `u` and `v` must be orthogonal. The face normal is
/// `u × v`, normalized.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticFace {
    element: ElementId,
    class: ElementClass,
    origin: Point3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
}

impl SyntheticFace {
    fn corners(&self) -> [Point3<f64>; 4] {
        [
            self.origin,
            self.origin + self.u,
            self.origin + self.u + self.v,
            self.origin + self.v,
        ]
    }

    fn normal(&self) -> Option<Vector3<f64>> {
        self.u.cross(&self.v).try_normalize(EPS)
    }

    /// Distance along the (unit) ray at which it pierces the rectangle,
    /// if it does.
    fn raycast(&self, origin: Point3<f64>, direction: Vector3<f64>) -> Option<f64> {
        let normal = self.u.cross(&self.v);
        let denom = direction.dot(&normal);
        if denom.abs() < EPS {
            // Parallel rays (even in-plane ones) never hit.
            return None;
        }
        let t = (self.origin - origin).dot(&normal) / denom;
        if t < -EPS {
            return None;
        }
        let hit = origin + direction * t.max(0.0);
        let w = hit - self.origin;
        let s = w.dot(&self.u) / self.u.norm_squared();
        let r = w.dot(&self.v) / self.v.norm_squared();
        let inside = (-EPS..=1.0 + EPS).contains(&s) && (-EPS..=1.0 + EPS).contains(&r);
        inside.then(|| t.max(0.0))
    }
}

/// A synthetic scene of rectangular faces, levels and views.
///
/// # Example
///
/// ```
/// use placement_types::{ElementClass, ElementId, SceneQuery, SyntheticScene};
/// use nalgebra::{Point3, Vector3};
///
/// let mut scene = SyntheticScene::new();
/// // A 10x10 wall face in the x=2 plane, facing -X.
/// let face = scene.add_rect_face(
///     ElementId(7),
///     ElementClass::Wall,
///     Point3::new(2.0, -5.0, -5.0),
///     Vector3::new(0.0, 0.0, 10.0),
///     Vector3::new(0.0, 10.0, 0.0),
/// );
/// assert_eq!(scene.face_loops(face).len(), 1);
/// assert_eq!(scene.face_normal(face), Some(-Vector3::x()));
/// ```
#[derive(Debug, Default)]
pub struct SyntheticScene {
    faces: Vec<SyntheticFace>,
    levels: Vec<(LevelId, f64)>,
    existing_view: Option<ViewId>,
    allow_view_creation: bool,
    created_view: Cell<Option<ViewId>>,
    views_created: Cell<usize>,
}

impl SyntheticScene {
    /// A scene that already contains a usable 3D query view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            existing_view: Some(ViewId(1)),
            allow_view_creation: true,
            ..Self::default()
        }
    }

    /// A scene with no query view; one can be created on demand.
    #[must_use]
    pub fn without_view() -> Self {
        Self {
            existing_view: None,
            allow_view_creation: true,
            ..Self::default()
        }
    }

    /// A scene with no query view and no way to create one.
    #[must_use]
    pub fn without_view_creation() -> Self {
        Self {
            existing_view: None,
            allow_view_creation: false,
            ..Self::default()
        }
    }

    /// Add a rectangular face and return its reference.
    ///
    /// `u` and `v` are the full edge vectors of the rectangle and must
    /// be orthogonal; the face normal is `u × v`, normalized.
    pub fn add_rect_face(
        &mut self,
        element: ElementId,
        class: ElementClass,
        origin: Point3<f64>,
        u: Vector3<f64>,
        v: Vector3<f64>,
    ) -> FaceRef {
        debug_assert!(u.dot(&v).abs() < EPS, "rectangle axes must be orthogonal");
        let index = self.faces.len();
        self.faces.push(SyntheticFace {
            element,
            class,
            origin,
            u,
            v,
        });
        FaceRef::new(element, index)
    }

    /// Add a level at the given elevation.
    pub fn add_level(&mut self, id: LevelId, elevation: f64) {
        self.levels.push((id, elevation));
    }

    /// How many transient views have been created so far.
    #[must_use]
    pub fn views_created(&self) -> usize {
        self.views_created.get()
    }

    fn face(&self, face: FaceRef) -> Option<&SyntheticFace> {
        self.faces
            .get(face.index)
            .filter(|f| f.element == face.element)
    }
}

impl SceneQuery for SyntheticScene {
    fn existing_query_view(&self) -> Option<ViewId> {
        self.existing_view.or_else(|| self.created_view.get())
    }

    fn create_query_view(&self) -> Option<ViewId> {
        if !self.allow_view_creation {
            return None;
        }
        let view = ViewId(900 + self.views_created.get() as u64);
        self.created_view.set(Some(view));
        self.views_created.set(self.views_created.get() + 1);
        Some(view)
    }

    fn intersect_ray(
        &self,
        _view: ViewId,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        target: RayTarget,
        classes: &[ElementClass],
    ) -> Vec<RayHit> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| classes.contains(&f.class))
            .filter_map(|(index, f)| {
                let distance = f.raycast(origin, direction)?;
                let hit_target = match target {
                    RayTarget::Face => HitTarget::Face(FaceRef::new(f.element, index)),
                    RayTarget::Element => HitTarget::Element(f.element),
                };
                Some(RayHit::new(hit_target, distance))
            })
            .collect()
    }

    fn face_loops(&self, face: FaceRef) -> Vec<EdgeLoop> {
        self.face(face)
            .map(|f| vec![EdgeLoop::from_points(&f.corners())])
            .unwrap_or_default()
    }

    fn face_normal(&self, face: FaceRef) -> Option<Vector3<f64>> {
        self.face(face).and_then(SyntheticFace::normal)
    }

    fn level_at_elevation(&self, elevation: f64) -> Option<LevelId> {
        self.levels
            .iter()
            .min_by(|a, b| (a.1 - elevation).abs().total_cmp(&(b.1 - elevation).abs()))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_at_x(scene: &mut SyntheticScene, x: f64, element: u64) -> FaceRef {
        scene.add_rect_face(
            ElementId(element),
            ElementClass::Wall,
            Point3::new(x, -5.0, -5.0),
            Vector3::new(0.0, 10.0, 0.0),
            Vector3::new(0.0, 0.0, 10.0),
        )
    }

    #[test]
    fn test_ray_hits_facing_rectangle() {
        let mut scene = SyntheticScene::new();
        let face = wall_at_x(&mut scene, 3.0, 1);
        let hits = scene.intersect_ray(
            ViewId(1),
            Point3::origin(),
            Vector3::x(),
            RayTarget::Face,
            &[ElementClass::Wall],
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, HitTarget::Face(face));
        assert_relative_eq!(hits[0].distance, 3.0);
    }

    #[test]
    fn test_ray_misses_behind_and_outside() {
        let mut scene = SyntheticScene::new();
        wall_at_x(&mut scene, 3.0, 1);
        // Behind the origin.
        let behind = scene.intersect_ray(
            ViewId(1),
            Point3::origin(),
            -Vector3::x(),
            RayTarget::Face,
            &[ElementClass::Wall],
        );
        assert!(behind.is_empty());
        // Off the edge of the rectangle.
        let outside = scene.intersect_ray(
            ViewId(1),
            Point3::new(0.0, 20.0, 0.0),
            Vector3::x(),
            RayTarget::Face,
            &[ElementClass::Wall],
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn test_class_filter_applies() {
        let mut scene = SyntheticScene::new();
        wall_at_x(&mut scene, 3.0, 1);
        let hits = scene.intersect_ray(
            ViewId(1),
            Point3::origin(),
            Vector3::x(),
            RayTarget::Element,
            &[ElementClass::Floor],
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_element_target_reports_owner() {
        let mut scene = SyntheticScene::new();
        wall_at_x(&mut scene, 3.0, 42);
        let hits = scene.intersect_ray(
            ViewId(1),
            Point3::origin(),
            Vector3::x(),
            RayTarget::Element,
            &[ElementClass::Wall],
        );
        assert_eq!(hits[0].target, HitTarget::Element(ElementId(42)));
    }

    #[test]
    fn test_face_loops_outer_rectangle() {
        let mut scene = SyntheticScene::new();
        let face = wall_at_x(&mut scene, 0.0, 1);
        let loops = scene.face_loops(face);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_relative_eq!(loops[0].perimeter(), 40.0);
    }

    #[test]
    fn test_unknown_face_has_no_data() {
        let scene = SyntheticScene::new();
        let bogus = FaceRef::new(ElementId(9), 3);
        assert!(scene.face_loops(bogus).is_empty());
        assert!(scene.face_normal(bogus).is_none());
    }

    #[test]
    fn test_view_creation_is_recorded() {
        let scene = SyntheticScene::without_view();
        assert!(scene.existing_query_view().is_none());
        let created = scene.create_query_view().unwrap();
        assert_eq!(scene.existing_query_view(), Some(created));
        assert_eq!(scene.views_created(), 1);
    }

    #[test]
    fn test_view_creation_can_be_denied() {
        let scene = SyntheticScene::without_view_creation();
        assert!(scene.create_query_view().is_none());
    }

    #[test]
    fn test_nearest_level() {
        let mut scene = SyntheticScene::new();
        scene.add_level(LevelId(1), 0.0);
        scene.add_level(LevelId(2), 10.0);
        assert_eq!(scene.level_at_elevation(9.0), Some(LevelId(2)));
        assert_eq!(scene.level_at_elevation(4.0), Some(LevelId(1)));
        assert_eq!(SyntheticScene::new().level_at_elevation(0.0), None);
    }
}
