//! Placement strategy dispatch.
//!
//! Each [`PlacementKind`] maps to a fixed [`Strategy`] row: which
//! request inputs it needs, how it finds a host, and whether it derives
//! a default orientation. [`resolve`] walks a request through its row
//! and produces an inert [`PlacementDescriptor`] for the glue layer.

use tracing::debug;

use placement_types::{InputKind, LevelId, PlacementKind, SceneQuery, MIN_LENGTH};

use crate::descriptor::{PlacementDescriptor, ResolvedHost};
use crate::error::{PlacementError, PlacementResult};
use crate::orientation::default_orientation;
use crate::params::ResolveParams;
use crate::proximity::{find_nearest_element, find_nearest_face, FACE_SEARCH_CLASSES};
use crate::request::PlacementRequest;

/// How a placement kind acquires its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// The kind places without a host.
    None,
    /// An element of the request's host kind must be found within the
    /// element search radius.
    RequiredElement,
    /// A face must be found within the face search radius.
    RequiredFace,
    /// A face is probed at the curve midpoint with the tight curve
    /// tolerance; finding none is a fallback, not a failure.
    OptionalCurveFace,
}

/// Whether a placement kind derives a default orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationStrategy {
    /// No orientation is derived.
    None,
    /// Derive a default frame from the host face boundary unless the
    /// request carries a usable facing hint.
    DefaultFrame,
}

/// One row of the placement decision table.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    /// Inputs the request must provide.
    pub requires: &'static [InputKind],
    /// How a host is acquired.
    pub host: HostStrategy,
    /// How orientation is derived.
    pub orientation: OrientationStrategy,
    /// Whether this kind can be resolved at all.
    pub supported: bool,
}

/// The decision table row for a placement kind.
///
/// # Example
///
/// ```
/// use placement_resolve::dispatch::{strategy, HostStrategy};
/// use placement_types::{InputKind, PlacementKind};
///
/// let row = strategy(PlacementKind::PointOnSurface);
/// assert_eq!(row.requires, &[InputKind::Point]);
/// assert_eq!(row.host, HostStrategy::RequiredFace);
/// assert!(!strategy(PlacementKind::AdaptiveMultipoint).supported);
/// ```
#[must_use]
pub const fn strategy(kind: PlacementKind) -> Strategy {
    match kind {
        PlacementKind::PointOnLevel => Strategy {
            requires: &[InputKind::Point],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::PointOnLevelHosted => Strategy {
            requires: &[InputKind::Point],
            host: HostStrategy::RequiredElement,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::TwoLevelSpanning => Strategy {
            requires: &[InputKind::Point, InputKind::BaseLevel],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::ViewSpecificPoint => Strategy {
            requires: &[InputKind::Point, InputKind::View],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::PointOnSurface => Strategy {
            requires: &[InputKind::Point],
            host: HostStrategy::RequiredFace,
            orientation: OrientationStrategy::DefaultFrame,
            supported: true,
        },
        PlacementKind::CurveOnSurface => Strategy {
            requires: &[InputKind::Curve],
            host: HostStrategy::OptionalCurveFace,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::CurveInView => Strategy {
            requires: &[InputKind::Curve, InputKind::View],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::CurveSpanningStructural => Strategy {
            requires: &[InputKind::Curve, InputKind::BaseLevel],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: true,
        },
        PlacementKind::AdaptiveMultipoint => Strategy {
            requires: &[],
            host: HostStrategy::None,
            orientation: OrientationStrategy::None,
            supported: false,
        },
    }
}

/// Resolve a placement request into a descriptor.
///
/// Resolution is strictly ordered: the kind's support is checked first,
/// then its required inputs in table order (fail-fast on the first one
/// missing), then the host search, then orientation. Levels are
/// resolved from elevations via [`SceneQuery::level_at_elevation`] when
/// the request carries an elevation but no level id; a rejected request
/// runs no scene query, except the elevation lookup needed to decide
/// whether a required base level is present.
///
/// # Errors
///
/// - [`PlacementError::UnsupportedKind`] for kinds that cannot be
///   resolved, before anything else is examined.
/// - [`PlacementError::MissingInput`] naming the first absent required
///   input. A required base level is missing only when both the level
///   id and the elevation lookup come up empty.
/// - [`PlacementError::NoHostFound`] when a required host search finds
///   nothing within its radius, or when a hosted kind carries no host
///   kind at all.
/// - Whatever the proximity search and orientation derivation report
///   ([`PlacementError::NoQueryView`],
///   [`PlacementError::FaceUnavailable`], geometry errors).
pub fn resolve<S: SceneQuery>(
    scene: &S,
    request: &PlacementRequest,
    params: &ResolveParams,
) -> PlacementResult<PlacementDescriptor> {
    let row = strategy(request.kind);
    if !row.supported {
        return Err(PlacementError::UnsupportedKind(request.kind));
    }

    let mut base_level = request.base_level;
    for &input in row.requires {
        let present = match input {
            InputKind::Point => request.point.is_some(),
            InputKind::Curve => request.curve.is_some(),
            InputKind::BaseLevel => {
                // The elevation lookup is the last resort before
                // declaring the base level missing; it is the only
                // scene query validation may run.
                base_level = resolve_level(scene, base_level, request.base_elevation);
                base_level.is_some()
            }
            InputKind::View => request.view.is_some(),
        };
        if !present {
            return Err(PlacementError::missing_input(request.kind, input));
        }
    }

    // A rejected request never reaches the scene beyond the required
    // base-level check; remaining level lookups run only once the
    // request is known to be valid.
    let base_level = resolve_level(scene, base_level, request.base_elevation);
    let top_level = resolve_level(scene, request.top_level, request.top_elevation);

    let host = resolve_host(scene, request, params, row.host)?;

    let frame = match (row.orientation, host.as_ref().and_then(ResolvedHost::face)) {
        (OrientationStrategy::DefaultFrame, Some(face)) if !has_facing_hint(request) => {
            Some(default_orientation(scene, face, params.orientation_tolerance)?)
        }
        _ => None,
    };

    Ok(PlacementDescriptor {
        kind: request.kind,
        requires: row.requires,
        host,
        frame,
        base_level,
        top_level,
        base_offset: request.base_offset,
        top_offset: request.top_offset,
        view: request.view,
    })
}

/// A level id, either given directly or looked up from an elevation.
fn resolve_level<S: SceneQuery>(
    scene: &S,
    level: Option<LevelId>,
    elevation: Option<f64>,
) -> Option<LevelId> {
    level.or_else(|| elevation.and_then(|e| scene.level_at_elevation(e)))
}

/// Whether the request carries a usable (non-near-zero) facing hint.
fn has_facing_hint(request: &PlacementRequest) -> bool {
    request
        .facing_hint
        .is_some_and(|hint| hint.try_normalize(MIN_LENGTH).is_some())
}

fn resolve_host<S: SceneQuery>(
    scene: &S,
    request: &PlacementRequest,
    params: &ResolveParams,
    host: HostStrategy,
) -> PlacementResult<Option<ResolvedHost>> {
    match host {
        HostStrategy::None => Ok(None),
        HostStrategy::RequiredElement => {
            let point = request
                .point
                .ok_or(PlacementError::missing_input(request.kind, InputKind::Point))?;
            // A family whose hosting behavior maps to no host kind can
            // never find one.
            let Some(host_kind) = request.host_kind else {
                return Err(PlacementError::no_host(params.element_search_radius));
            };
            let found =
                find_nearest_element(scene, point, params.element_search_radius, host_kind)?
                    .ok_or(PlacementError::no_host(params.element_search_radius))?;
            Ok(Some(ResolvedHost::Element(found)))
        }
        HostStrategy::RequiredFace => {
            let point = request
                .point
                .ok_or(PlacementError::missing_input(request.kind, InputKind::Point))?;
            let found =
                find_nearest_face(scene, point, params.face_search_radius, &FACE_SEARCH_CLASSES)?
                    .ok_or(PlacementError::no_host(params.face_search_radius))?;
            Ok(Some(ResolvedHost::Face(found)))
        }
        HostStrategy::OptionalCurveFace => {
            let curve = request
                .curve
                .ok_or(PlacementError::missing_input(request.kind, InputKind::Curve))?;
            let found = find_nearest_face(
                scene,
                curve.midpoint(),
                params.curve_host_tolerance,
                &FACE_SEARCH_CLASSES,
            )?;
            if found.is_none() {
                debug!(kind = ?request.kind, "no face at curve midpoint; placing host-free");
            }
            Ok(found.map(ResolvedHost::Face))
        }
    }
}
