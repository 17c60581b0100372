//! The caller-facing placement request.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use placement_types::{HostKind, LevelId, PlacementKind, Segment, ViewId};

/// Everything the caller knows about the instance to place.
///
/// Only `kind` is mandatory; which of the remaining fields must be set
/// depends on the kind and is checked by
/// [`resolve`](crate::dispatch::resolve). Optional fields left `None`
/// mean "not provided", never a sentinel value.
///
/// # Example
///
/// ```
/// use placement_resolve::PlacementRequest;
/// use placement_types::PlacementKind;
/// use nalgebra::Point3;
///
/// let request = PlacementRequest::new(PlacementKind::PointOnLevel)
///     .with_point(Point3::new(10.0, 4.0, 0.0))
///     .with_base_elevation(0.0);
/// assert!(request.point.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementRequest {
    /// How the instance is placed.
    pub kind: PlacementKind,
    /// Insertion point, for point-based kinds.
    pub point: Option<Point3<f64>>,
    /// Location curve, for curve-based kinds.
    pub curve: Option<Segment>,
    /// Base level, when the caller already knows it.
    pub base_level: Option<LevelId>,
    /// Base elevation to resolve a level from when `base_level` is unset.
    pub base_elevation: Option<f64>,
    /// Top level for spanning kinds.
    pub top_level: Option<LevelId>,
    /// Top elevation to resolve a level from when `top_level` is unset.
    pub top_elevation: Option<f64>,
    /// Offset from the base level, in document units.
    pub base_offset: Option<f64>,
    /// Offset from the top level, in document units.
    pub top_offset: Option<f64>,
    /// Caller-supplied facing direction, overriding derivation.
    pub facing_hint: Option<Vector3<f64>>,
    /// Hosting behavior of the family, for hosted kinds.
    pub host_kind: Option<HostKind>,
    /// Target view, for view-specific kinds.
    pub view: Option<ViewId>,
}

impl PlacementRequest {
    /// A request with only the placement kind set.
    #[must_use]
    pub const fn new(kind: PlacementKind) -> Self {
        Self {
            kind,
            point: None,
            curve: None,
            base_level: None,
            base_elevation: None,
            top_level: None,
            top_elevation: None,
            base_offset: None,
            top_offset: None,
            facing_hint: None,
            host_kind: None,
            view: None,
        }
    }

    /// Set the insertion point.
    #[must_use]
    pub const fn with_point(mut self, point: Point3<f64>) -> Self {
        self.point = Some(point);
        self
    }

    /// Set the location curve.
    #[must_use]
    pub const fn with_curve(mut self, curve: Segment) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Set the base level directly.
    #[must_use]
    pub const fn with_base_level(mut self, level: LevelId) -> Self {
        self.base_level = Some(level);
        self
    }

    /// Set the elevation the base level is resolved from.
    #[must_use]
    pub const fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = Some(elevation);
        self
    }

    /// Set the top level directly.
    #[must_use]
    pub const fn with_top_level(mut self, level: LevelId) -> Self {
        self.top_level = Some(level);
        self
    }

    /// Set the elevation the top level is resolved from.
    #[must_use]
    pub const fn with_top_elevation(mut self, elevation: f64) -> Self {
        self.top_elevation = Some(elevation);
        self
    }

    /// Set the offset from the base level.
    #[must_use]
    pub const fn with_base_offset(mut self, offset: f64) -> Self {
        self.base_offset = Some(offset);
        self
    }

    /// Set the offset from the top level.
    #[must_use]
    pub const fn with_top_offset(mut self, offset: f64) -> Self {
        self.top_offset = Some(offset);
        self
    }

    /// Override the derived facing direction.
    #[must_use]
    pub const fn with_facing_hint(mut self, facing: Vector3<f64>) -> Self {
        self.facing_hint = Some(facing);
        self
    }

    /// Declare the family's hosting behavior.
    #[must_use]
    pub const fn with_host_kind(mut self, host: HostKind) -> Self {
        self.host_kind = Some(host);
        self
    }

    /// Set the target view.
    #[must_use]
    pub const fn with_view(mut self, view: ViewId) -> Self {
        self.view = Some(view);
        self
    }
}
