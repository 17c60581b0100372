//! Placement kind enumeration and required-input names.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an instance attaches to the model.
///
/// This is a closed enumeration mirroring the host document's family
/// placement types; it is not extensible at runtime.
///
/// # Example
///
/// ```
/// use placement_types::PlacementKind;
///
/// assert!(PlacementKind::PointOnSurface.is_point_based());
/// assert!(PlacementKind::CurveOnSurface.is_curve_based());
/// assert!(!PlacementKind::AdaptiveMultipoint.is_point_based());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlacementKind {
    /// A point placed relative to a single level.
    PointOnLevel,
    /// A point embedded in a host element found near the point
    /// (doors, windows, fixtures).
    PointOnLevelHosted,
    /// A point spanning from a base level to a top level (columns).
    TwoLevelSpanning,
    /// A point that exists only in a specific 2D view (annotations).
    ViewSpecificPoint,
    /// A point placed on a host face, oriented in the face plane.
    PointOnSurface,
    /// A curve placed on a host face when one is close enough,
    /// otherwise placed free relative to a level.
    CurveOnSurface,
    /// A curve that exists only in a specific 2D view (detail
    /// components).
    CurveInView,
    /// A structural curve spanning from a base level (beams, braces).
    CurveSpanningStructural,
    /// Adaptive multi-point placement. Listed for completeness of the
    /// enumeration; resolution always fails as unsupported.
    AdaptiveMultipoint,
}

impl PlacementKind {
    /// All placement kinds, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::PointOnLevel,
        Self::PointOnLevelHosted,
        Self::TwoLevelSpanning,
        Self::ViewSpecificPoint,
        Self::PointOnSurface,
        Self::CurveOnSurface,
        Self::CurveInView,
        Self::CurveSpanningStructural,
        Self::AdaptiveMultipoint,
    ];

    /// Whether this kind is located by a single point.
    #[must_use]
    pub const fn is_point_based(self) -> bool {
        matches!(
            self,
            Self::PointOnLevel
                | Self::PointOnLevelHosted
                | Self::TwoLevelSpanning
                | Self::ViewSpecificPoint
                | Self::PointOnSurface
        )
    }

    /// Whether this kind is located by a curve.
    #[must_use]
    pub const fn is_curve_based(self) -> bool {
        matches!(
            self,
            Self::CurveOnSurface | Self::CurveInView | Self::CurveSpanningStructural
        )
    }
}

/// A named input that a placement kind may require.
///
/// Used by the strategy table to declare requirements and by
/// `MissingInput` errors to name what was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputKind {
    /// The insertion point.
    Point,
    /// The location curve.
    Curve,
    /// The base level (directly or via an elevation lookup).
    BaseLevel,
    /// The owning 2D view.
    View,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_enumerated() {
        assert_eq!(PlacementKind::ALL.len(), 9);
    }

    #[test]
    fn test_point_and_curve_partition() {
        for kind in PlacementKind::ALL {
            // Adaptive is neither; every other kind is exactly one.
            if kind == PlacementKind::AdaptiveMultipoint {
                assert!(!kind.is_point_based());
                assert!(!kind.is_curve_based());
            } else {
                assert_ne!(kind.is_point_based(), kind.is_curve_based());
            }
        }
    }
}
