//! Core types for host-aware instance placement.
//!
//! This crate provides the foundational data model shared by the
//! placement resolution algorithms:
//!
//! - [`Segment`] and [`EdgeLoop`] - face boundary geometry
//! - [`OrientationFrame`] - the (facing, hand, normal) triple of a
//!   placed instance
//! - [`PlacementKind`] and [`InputKind`] - the closed placement
//!   enumeration and its required-input names
//! - [`SceneQuery`] - the read-only capability a host document exposes
//!   to the algorithms (ray intersection, boundary enumeration, normal
//!   evaluation, level lookup, query-view management)
//! - [`SyntheticScene`] - an in-memory [`SceneQuery`] implementation
//!   for tests and examples
//!
//! # Units
//!
//! All coordinates are `f64` in the host document's internal unit
//! (feet). Conversion constants live in the resolving crate.
//!
//! # Coordinate System
//!
//! Right-handed, Z up. A fully resolved [`OrientationFrame`] has its
//! hand, facing and normal axes mutually orthogonal.
//!
//! # Example
//!
//! ```
//! use placement_types::{EdgeLoop, Segment};
//! use nalgebra::Point3;
//!
//! let loop_ = EdgeLoop::from_points(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//!     Point3::new(4.0, 2.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//! ]);
//! assert_eq!(loop_.len(), 4);
//! assert!(loop_.iter().all(|s: &Segment| s.length() > 0.0));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod boundary;
mod frame;
mod kind;
mod scene;
mod synthetic;

// Re-export core types
pub use boundary::{EdgeLoop, Segment, MIN_LENGTH};
pub use frame::OrientationFrame;
pub use kind::{InputKind, PlacementKind};
pub use scene::{
    ElementClass, ElementId, FaceRef, HitTarget, HostKind, LevelId, RayHit, RayTarget, SceneQuery,
    ViewId,
};
pub use synthetic::{SyntheticFace, SyntheticScene};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
