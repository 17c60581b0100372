//! Host-aware placement resolution for family instances.
//!
//! Given a [`PlacementRequest`] and a read-only
//! [`SceneQuery`](placement_types::SceneQuery) capability, this crate
//! resolves everything a placement kind needs before an instance can be
//! created: the nearest host face or element, a default orientation
//! frame derived from the host face boundary, levels looked up from
//! elevations, and the pass-through offsets and view. The result is an
//! inert [`PlacementDescriptor`]; creating the instance (and holding
//! the write transaction a query-view creation may need) stays with the
//! caller.
//!
//! # Pipeline
//!
//! 1. **Dispatch** ([`dispatch`]) - map the placement kind to its
//!    decision-table row and validate required inputs.
//! 2. **Proximity** ([`proximity`]) - six-axis-ray search for the
//!    nearest host face or element within a radius.
//! 3. **Directions** ([`directions`]) - cluster a face boundary's edge
//!    directions into weighted groups and extract the two dominant
//!    axes.
//! 4. **Orientation** ([`orientation`]) - assemble a right-handed
//!    (facing, hand, normal) frame, repairing the hand when the
//!    extracted axes disagree with the face normal.
//!
//! # Example
//!
//! ```
//! use placement_resolve::{resolve, PlacementRequest, ResolveParams};
//! use placement_types::{ElementClass, ElementId, PlacementKind, SyntheticScene};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut scene = SyntheticScene::new();
//! scene.add_rect_face(
//!     ElementId(1),
//!     ElementClass::Wall,
//!     Point3::new(2.0, -5.0, -5.0),
//!     Vector3::new(0.0, 10.0, 0.0),
//!     Vector3::new(0.0, 0.0, 10.0),
//! );
//!
//! let request = PlacementRequest::new(PlacementKind::PointOnSurface)
//!     .with_point(Point3::origin());
//! let descriptor = resolve(&scene, &request, &ResolveParams::default()).unwrap();
//! assert!(descriptor.host.is_some());
//! assert!(descriptor.frame.is_some());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod directions;
pub mod dispatch;
pub mod error;
pub mod orientation;
pub mod params;
pub mod proximity;
pub mod request;

pub use descriptor::{PlacementDescriptor, ResolvedHost};
pub use directions::{direction_groups, main_directions, DirectionGroup, MainDirections};
pub use dispatch::{resolve, strategy, HostStrategy, OrientationStrategy, Strategy};
pub use error::{PlacementError, PlacementResult};
pub use orientation::{
    default_orientation, is_right_handed, orientation_from_boundary, repair_index,
};
pub use params::{ResolveParams, MM_PER_FOOT};
pub use proximity::{find_nearest_element, find_nearest_face, HostCandidate};
pub use request::PlacementRequest;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
