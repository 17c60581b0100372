//! Error types for placement resolution.

use placement_types::{FaceRef, InputKind, PlacementKind};
use thiserror::Error;

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Errors that can occur while resolving a placement request.
///
/// All failures are surfaced synchronously to the caller; nothing is
/// retried internally. Orientation repair failure is deliberately not
/// represented here: it degrades to a best-effort frame instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    /// A required input for the chosen placement kind is absent.
    #[error("required input {input:?} is missing for placement kind {kind:?}")]
    MissingInput {
        /// The placement kind being resolved.
        kind: PlacementKind,
        /// The input that was absent.
        input: InputKind,
    },

    /// The placement kind has no resolution algorithm.
    #[error("placement kind {0:?} is not supported")]
    UnsupportedKind(PlacementKind),

    /// Proximity search exhausted all six rays without a qualifying hit.
    #[error("no host geometry found within search radius {radius}")]
    NoHostFound {
        /// The search radius that was exhausted.
        radius: f64,
    },

    /// The face boundary has too few usable edges to derive directions.
    #[error("face boundary has {edges} usable edges; at least 4 are required")]
    InsufficientGeometry {
        /// Number of non-degenerate edges found.
        edges: usize,
    },

    /// No direction group could be formed from the boundary.
    ///
    /// Defensive: unreachable for boundaries that pass the edge-count
    /// gate, but kept as a distinct failure kind.
    #[error("no direction group could be formed from the face boundary")]
    DegenerateDirection,

    /// No 3D query view exists and one could not be created.
    #[error("no 3D query view exists and one could not be created")]
    NoQueryView,

    /// A face reported by the scene has no retrievable boundary data.
    #[error("face {0:?} has no retrievable boundary data")]
    FaceUnavailable(FaceRef),
}

impl PlacementError {
    /// Create a missing-input error.
    #[must_use]
    pub const fn missing_input(kind: PlacementKind, input: InputKind) -> Self {
        Self::MissingInput { kind, input }
    }

    /// Create a no-host-found error.
    #[must_use]
    pub const fn no_host(radius: f64) -> Self {
        Self::NoHostFound { radius }
    }

    /// Create an insufficient-geometry error.
    #[must_use]
    pub const fn insufficient_geometry(edges: usize) -> Self {
        Self::InsufficientGeometry { edges }
    }

    /// Check if this is a missing-input error.
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }

    /// Check if this is a no-host-found error.
    #[must_use]
    pub const fn is_no_host(&self) -> bool {
        matches!(self, Self::NoHostFound { .. })
    }

    /// Check if this is an unsupported-kind error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedKind(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlacementError::missing_input(PlacementKind::PointOnLevel, InputKind::Point);
        assert!(err.to_string().contains("Point"));
        assert!(err.to_string().contains("PointOnLevel"));

        let err = PlacementError::insufficient_geometry(3);
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains("at least 4"));

        let err = PlacementError::no_host(5.0);
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_error_predicates() {
        let err = PlacementError::missing_input(PlacementKind::CurveInView, InputKind::View);
        assert!(err.is_missing_input());
        assert!(!err.is_no_host());

        let err = PlacementError::UnsupportedKind(PlacementKind::AdaptiveMultipoint);
        assert!(err.is_unsupported());

        let err = PlacementError::no_host(3.0);
        assert!(err.is_no_host());
    }
}
