//! The resolved placement plan handed back to the glue layer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use placement_types::{
    ElementId, FaceRef, InputKind, LevelId, OrientationFrame, PlacementKind, ViewId,
};

use crate::proximity::HostCandidate;

/// The host an instance resolved to, when its kind needs one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolvedHost {
    /// A face host, for surface-based kinds.
    Face(HostCandidate<FaceRef>),
    /// An element host, for hosted point kinds.
    Element(HostCandidate<ElementId>),
}

impl ResolvedHost {
    /// The face reference, when the host is a face.
    #[must_use]
    pub const fn face(&self) -> Option<FaceRef> {
        match self {
            Self::Face(candidate) => Some(candidate.reference),
            Self::Element(_) => None,
        }
    }

    /// The element identifier, when the host is an element.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Element(candidate) => Some(candidate.reference),
            Self::Face(_) => None,
        }
    }

    /// Distance from the search origin to the host.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        match self {
            Self::Face(candidate) => candidate.distance,
            Self::Element(candidate) => candidate.distance,
        }
    }
}

/// Everything resolved on behalf of the caller, ready to feed the host
/// document's creation API.
///
/// Produced by [`resolve`](crate::dispatch::resolve). The descriptor is
/// inert data: creating the instance, opening transactions and applying
/// the orientation are the glue layer's job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementDescriptor {
    /// The placement kind that was resolved.
    pub kind: PlacementKind,
    /// Inputs this kind consumed from the request.
    ///
    /// Points into the static strategy table; not serialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub requires: &'static [InputKind],
    /// Resolved host, for kinds that search for one.
    pub host: Option<ResolvedHost>,
    /// Advisory orientation frame for surface-based kinds.
    pub frame: Option<OrientationFrame>,
    /// Resolved base level.
    pub base_level: Option<LevelId>,
    /// Resolved top level.
    pub top_level: Option<LevelId>,
    /// Offset from the base level, passed through from the request.
    pub base_offset: Option<f64>,
    /// Offset from the top level, passed through from the request.
    pub top_offset: Option<f64>,
    /// Target view, for view-specific kinds.
    pub view: Option<ViewId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_host_accessors() {
        let face = ResolvedHost::Face(HostCandidate::new(FaceRef::new(ElementId(1), 0), 2.5));
        assert_eq!(face.face(), Some(FaceRef::new(ElementId(1), 0)));
        assert!(face.element().is_none());
        assert_eq!(face.distance(), 2.5);

        let element = ResolvedHost::Element(HostCandidate::new(ElementId(7), 0.0));
        assert_eq!(element.element(), Some(ElementId(7)));
        assert!(element.face().is_none());
    }
}
