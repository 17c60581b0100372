//! Dominant-direction extraction from face boundaries.
//!
//! # Algorithm
//!
//! Boundary edges are clustered greedily into groups of parallel (or
//! anti-parallel) directions; each group is weighted by the total
//! length of its member edges, and the two heaviest groups provide the
//! primary and secondary in-plane directions of the face.
//!
//! Opposite-pointing edges on the same axis must reinforce rather than
//! cancel, so group membership compares absolute dot products and the
//! group average flips the sign of members pointing away from the
//! group's first edge.

use nalgebra::Vector3;
use tracing::debug;

use placement_types::{EdgeLoop, MIN_LENGTH};

use crate::error::{PlacementError, PlacementResult};

/// Clustering threshold on the absolute dot product between an edge
/// direction and a group's running average.
///
/// 0.8 corresponds to roughly 37 degrees of angular tolerance. The
/// behavior was historically described as a 30-degree tolerance (which
/// would be a threshold of about 0.866); the numeric value 0.8 is the
/// contract and is kept as-is.
pub const AXIS_DOT_THRESHOLD: f64 = 0.8;

/// Minimum number of non-degenerate boundary edges required.
pub const MIN_BOUNDARY_EDGES: usize = 4;

/// A cluster of boundary edges treated as one structural axis.
#[derive(Debug, Clone)]
pub struct DirectionGroup {
    /// Indices into the filtered edge list.
    pub members: Vec<usize>,
    /// Sum of the member edges' lengths.
    pub weight: f64,
    /// Length-weighted average unit direction of the members.
    pub direction: Vector3<f64>,
}

/// The two dominant in-plane directions of a face boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainDirections {
    /// Direction of the heaviest edge group.
    pub primary: Vector3<f64>,
    /// Direction of the second-heaviest group, or a synthesized
    /// perpendicular when only one group exists.
    pub secondary: Vector3<f64>,
}

/// Extract the two dominant directions of a closed boundary loop.
///
/// Edges shorter than [`MIN_LENGTH`](placement_types::MIN_LENGTH) are
/// discarded before clustering. When only one direction group exists
/// (all edges on one axis), the secondary direction is synthesized as
/// `normalize(cross(face_normal, primary))`. No orthogonality between
/// primary and secondary is enforced here; orientation resolution owns
/// that.
///
/// # Errors
///
/// - [`PlacementError::InsufficientGeometry`] if fewer than
///   [`MIN_BOUNDARY_EDGES`] usable edges remain.
/// - [`PlacementError::DegenerateDirection`] if no direction group can
///   be formed (defensive), or if the synthesized secondary collapses
///   because the face normal is parallel to the only axis.
///
/// # Example
///
/// ```
/// use placement_resolve::directions::main_directions;
/// use placement_types::EdgeLoop;
/// use nalgebra::{Point3, Vector3};
///
/// // A 4x2 rectangle in the XY plane.
/// let rect = EdgeLoop::from_points(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
///     Point3::new(4.0, 2.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ]);
/// let dirs = main_directions(&rect, &Vector3::z()).unwrap();
/// // The long edges dominate.
/// assert!((dirs.primary.x.abs() - 1.0).abs() < 1e-9);
/// assert!((dirs.secondary.y.abs() - 1.0).abs() < 1e-9);
/// ```
pub fn main_directions(
    boundary: &EdgeLoop,
    face_normal: &Vector3<f64>,
) -> PlacementResult<MainDirections> {
    let groups = direction_groups(boundary)?;

    // Stable sort keeps insertion order among equal weights.
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| groups[b].weight.total_cmp(&groups[a].weight));

    match order.as_slice() {
        [first, second, ..] => Ok(MainDirections {
            primary: groups[*first].direction,
            secondary: groups[*second].direction,
        }),
        [only] => {
            let primary = groups[*only].direction;
            let secondary = face_normal
                .cross(&primary)
                .try_normalize(MIN_LENGTH)
                .ok_or(PlacementError::DegenerateDirection)?;
            debug!("single direction group; synthesized perpendicular secondary");
            Ok(MainDirections { primary, secondary })
        }
        [] => Err(PlacementError::DegenerateDirection),
    }
}

/// Cluster a boundary's edges into direction groups.
///
/// Groups are recomputed per invocation and are not persisted. Each
/// edge joins the first existing group whose running weighted-average
/// direction it matches within [`AXIS_DOT_THRESHOLD`] (absolute dot
/// product, so anti-parallel edges merge), or starts a new group.
///
/// # Errors
///
/// [`PlacementError::InsufficientGeometry`] if fewer than
/// [`MIN_BOUNDARY_EDGES`] usable edges remain after discarding
/// degenerate ones.
pub fn direction_groups(boundary: &EdgeLoop) -> PlacementResult<Vec<DirectionGroup>> {
    let mut directions = Vec::with_capacity(boundary.len());
    let mut lengths = Vec::with_capacity(boundary.len());
    for segment in boundary.iter() {
        let length = segment.length();
        if length > MIN_LENGTH {
            if let Some(direction) = segment.direction() {
                directions.push(direction);
                lengths.push(length);
            }
        }
    }

    if directions.len() < MIN_BOUNDARY_EDGES {
        return Err(PlacementError::insufficient_geometry(directions.len()));
    }

    let mut members: Vec<Vec<usize>> = Vec::new();
    'edges: for (index, direction) in directions.iter().enumerate() {
        for group in &mut members {
            let Some(average) = weighted_average(group, &directions, &lengths) else {
                continue;
            };
            if average.dot(direction).abs() > AXIS_DOT_THRESHOLD {
                group.push(index);
                continue 'edges;
            }
        }
        members.push(vec![index]);
    }

    let groups: Vec<DirectionGroup> = members
        .into_iter()
        .filter_map(|group| {
            let direction = weighted_average(&group, &directions, &lengths)?;
            let weight = group.iter().map(|&i| lengths[i]).sum();
            Some(DirectionGroup {
                members: group,
                weight,
                direction,
            })
        })
        .collect();

    debug!(
        edges = directions.len(),
        groups = groups.len(),
        "clustered boundary edges"
    );
    Ok(groups)
}

/// Length-weighted average direction of a group of edges.
///
/// The group's first member is the sign reference: members pointing
/// away from it contribute negatively, so anti-parallel collinear
/// edges reinforce instead of canceling. When the contributions cancel
/// exactly anyway, the reference direction itself is returned. `None`
/// only for an empty group.
fn weighted_average(
    members: &[usize],
    directions: &[Vector3<f64>],
    lengths: &[f64],
) -> Option<Vector3<f64>> {
    let reference = directions[*members.first()?];
    let mut sum = Vector3::zeros();
    for &index in members {
        let direction = directions[index];
        let factor = if reference.dot(&direction) >= 0.0 {
            lengths[index]
        } else {
            -lengths[index]
        };
        sum += direction * factor;
    }
    Some(sum.try_normalize(MIN_LENGTH).unwrap_or(reference))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use placement_types::Segment;

    fn rectangle(width: f64, height: f64) -> EdgeLoop {
        EdgeLoop::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, height, 0.0),
            Point3::new(0.0, height, 0.0),
        ])
    }

    #[test]
    fn test_rectangle_primary_is_long_axis() {
        let dirs = main_directions(&rectangle(4.0, 2.0), &Vector3::z()).unwrap();
        // Long edges weigh 8 total, short edges 4.
        assert_relative_eq!(dirs.primary.x.abs(), 1.0);
        assert_relative_eq!(dirs.primary.y, 0.0);
        assert_relative_eq!(dirs.secondary.y.abs(), 1.0);
    }

    #[test]
    fn test_rectangle_groups_pair_opposite_edges() {
        let groups = direction_groups(&rectangle(4.0, 2.0)).unwrap();
        assert_eq!(groups.len(), 2);
        let mut weights: Vec<f64> = groups.iter().map(|g| g.weight).collect();
        weights.sort_by(f64::total_cmp);
        assert_relative_eq!(weights[0], 4.0);
        assert_relative_eq!(weights[1], 8.0);
        for group in &groups {
            assert_eq!(group.members.len(), 2);
            assert_relative_eq!(group.direction.norm(), 1.0);
        }
    }

    #[test]
    fn test_three_edges_insufficient() {
        let triangle = EdgeLoop::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let err = main_directions(&triangle, &Vector3::z()).unwrap_err();
        assert_eq!(err, PlacementError::insufficient_geometry(3));
    }

    #[test]
    fn test_degenerate_edges_discarded() {
        // A rectangle with a zero-length edge spliced in: five
        // segments, four usable.
        let p = Point3::new(4.0, 0.0, 0.0);
        let loop_ = EdgeLoop::new(vec![
            Segment::new(Point3::new(0.0, 0.0, 0.0), p),
            Segment::new(p, p),
            Segment::new(p, Point3::new(4.0, 2.0, 0.0)),
            Segment::new(Point3::new(4.0, 2.0, 0.0), Point3::new(0.0, 2.0, 0.0)),
            Segment::new(Point3::new(0.0, 2.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
        ]);
        let dirs = main_directions(&loop_, &Vector3::z()).unwrap();
        assert_relative_eq!(dirs.primary.x.abs(), 1.0);
    }

    #[test]
    fn test_collinear_back_and_forth_single_group() {
        // Four collinear edges traced back and forth: one group whose
        // sign-corrected average must not cancel to zero.
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 0.0, 0.0);
        let loop_ = EdgeLoop::new(vec![
            Segment::new(a, b),
            Segment::new(b, a),
            Segment::new(a, b),
            Segment::new(b, a),
        ]);
        let groups = direction_groups(&loop_).unwrap();
        assert_eq!(groups.len(), 1);
        assert_relative_eq!(groups[0].weight, 12.0);
        assert_relative_eq!(groups[0].direction.norm(), 1.0);
        assert_relative_eq!(groups[0].direction.x.abs(), 1.0);

        // The secondary is synthesized perpendicular to the only axis.
        let dirs = main_directions(&loop_, &Vector3::z()).unwrap();
        assert_relative_eq!(dirs.primary.dot(&dirs.secondary), 0.0);
        assert_relative_eq!(dirs.secondary.norm(), 1.0);
    }

    #[test]
    fn test_single_axis_parallel_normal_degenerates() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 0.0, 0.0);
        let loop_ = EdgeLoop::new(vec![
            Segment::new(a, b),
            Segment::new(b, a),
            Segment::new(a, b),
            Segment::new(b, a),
        ]);
        // A "normal" along the only axis leaves no perpendicular.
        let err = main_directions(&loop_, &Vector3::x()).unwrap_err();
        assert_eq!(err, PlacementError::DegenerateDirection);
    }

    #[test]
    fn test_skewed_parallelogram_two_groups() {
        // Edges at roughly 60 degrees to each other stay separate
        // (|dot| = 0.5 < 0.8).
        let loop_ = EdgeLoop::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(5.0, 1.732, 0.0),
            Point3::new(1.0, 1.732, 0.0),
        ]);
        let groups = direction_groups(&loop_).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_near_parallel_edges_merge() {
        // Edges 10 degrees apart merge (|dot| ~ 0.985 > 0.8).
        let loop_ = EdgeLoop::new(vec![
            Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
            Segment::new(Point3::new(1.0, 0.0, 0.0), Point3::new(1.985, 0.174, 0.0)),
            Segment::new(Point3::new(1.985, 0.174, 0.0), Point3::new(1.985, 1.0, 0.0)),
            Segment::new(Point3::new(1.985, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
        ]);
        let groups = direction_groups(&loop_).unwrap();
        assert!(groups.len() < 4);
        assert!(groups[0].members.len() >= 2);
    }

    #[test]
    fn test_weights_drive_primary_choice() {
        // Same rectangle rotated so the long axis is Y.
        let dirs = main_directions(&rectangle(2.0, 4.0), &Vector3::z()).unwrap();
        assert_relative_eq!(dirs.primary.y.abs(), 1.0);
        assert_relative_eq!(dirs.secondary.x.abs(), 1.0);
    }
}
