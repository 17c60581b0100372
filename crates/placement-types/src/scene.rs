//! The scene-query capability and its opaque identifiers.
//!
//! Placement algorithms never touch the host document directly. They
//! consume a read-only [`SceneQuery`] capability and return opaque
//! identifiers for the glue layer to act on, so every algorithm can be
//! exercised against a synthetic scene (see [`crate::SyntheticScene`]).

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::EdgeLoop;

/// Opaque identifier of an element in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementId(pub u64);

/// Opaque reference to one face of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceRef {
    /// The element owning the face.
    pub element: ElementId,
    /// Index of the face within the element's geometry.
    pub index: usize,
}

impl FaceRef {
    /// Create a face reference.
    #[must_use]
    pub const fn new(element: ElementId, index: usize) -> Self {
        Self { element, index }
    }
}

/// Opaque identifier of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelId(pub u64);

/// Opaque identifier of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewId(pub u64);

/// Element classes a ray query can be filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementClass {
    /// Walls.
    Wall,
    /// Floors.
    Floor,
    /// Ceilings.
    Ceiling,
    /// Roofs.
    Roof,
    /// Placed family instances.
    FamilyInstance,
}

/// The element class a hosted family attaches to.
///
/// Mirrors the host document's hosting-behavior parameter; families
/// with any other hosting behavior cannot be resolved to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HostKind {
    /// Hosted by a wall.
    Wall,
    /// Hosted by a floor.
    Floor,
    /// Hosted by a ceiling.
    Ceiling,
    /// Hosted by a roof.
    Roof,
}

impl HostKind {
    /// The element class searched for this host kind.
    #[must_use]
    pub const fn element_class(self) -> ElementClass {
        match self {
            Self::Wall => ElementClass::Wall,
            Self::Floor => ElementClass::Floor,
            Self::Ceiling => ElementClass::Ceiling,
            Self::Roof => ElementClass::Roof,
        }
    }
}

/// What a ray query should report hits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayTarget {
    /// Report the individual faces intersected.
    Face,
    /// Report the elements intersected.
    Element,
}

/// What a ray hit resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HitTarget {
    /// A face hit (from [`RayTarget::Face`] queries).
    Face(FaceRef),
    /// An element hit (from [`RayTarget::Element`] queries).
    Element(ElementId),
}

/// One intersection along a cast ray.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RayHit {
    /// The face or element that was hit.
    pub target: HitTarget,
    /// Distance from the ray origin to the hit, in document units.
    pub distance: f64,
}

impl RayHit {
    /// Create a hit record.
    #[must_use]
    pub const fn new(target: HitTarget, distance: f64) -> Self {
        Self { target, distance }
    }
}

/// Read-only geometric queries against the host document.
///
/// All methods are blocking calls into the document's in-memory model,
/// under its single-writer threading rules. The one permitted side
/// effect is [`SceneQuery::create_query_view`], which the core invokes
/// only when no query view exists; the caller must hold an open write
/// transaction for the duration of any call that may trigger it.
pub trait SceneQuery {
    /// The first existing non-template 3D view usable for ray queries.
    fn existing_query_view(&self) -> Option<ViewId>;

    /// Create a transient 3D view for ray queries.
    ///
    /// Side-effectful: mutates the document and therefore requires an
    /// active write transaction. Returns `None` if the document cannot
    /// host such a view. Implementations should make the created view
    /// visible to subsequent [`SceneQuery::existing_query_view`] calls
    /// so at most one view is ever created.
    fn create_query_view(&self) -> Option<ViewId>;

    /// All intersections of a ray with elements of the given classes.
    ///
    /// Includes geometry from externally referenced sub-documents. The
    /// returned hits need not be sorted; distances are measured from
    /// `origin` along the (unit) `direction`.
    fn intersect_ray(
        &self,
        view: ViewId,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        target: RayTarget,
        classes: &[ElementClass],
    ) -> Vec<RayHit>;

    /// Boundary loops of a face, outer loop first.
    ///
    /// Empty when the reference does not resolve to a face with
    /// boundary data.
    fn face_loops(&self, face: FaceRef) -> Vec<EdgeLoop>;

    /// Face normal evaluated at the parametric center of the face.
    fn face_normal(&self, face: FaceRef) -> Option<Vector3<f64>>;

    /// The level whose elevation is nearest the given one.
    fn level_at_elevation(&self, elevation: f64) -> Option<LevelId>;
}
