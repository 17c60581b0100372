//! Orientation frames for placed instances.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The local orientation of a placed instance relative to its host.
///
/// The frame consists of three vectors:
/// - `facing`: the instance's positive Y axis after insertion
/// - `hand`: the instance's positive X axis after insertion
/// - `normal`: the host face normal
///
/// A fully resolved frame has all three pairwise orthogonal and
/// right-handed in the sense of
/// `placement_resolve::orientation::is_right_handed(hand, facing, normal)`.
/// Orientation resolution is advisory: a frame may be returned in a
/// degraded (non-orthogonal) state when repair is impossible, and
/// callers should treat it as best-effort.
///
/// # Example
///
/// ```
/// use placement_types::OrientationFrame;
/// use nalgebra::Vector3;
///
/// let frame = OrientationFrame::new(Vector3::y(), Vector3::x(), Vector3::z());
/// assert_eq!(frame.facing, Vector3::y());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationFrame {
    /// Facing direction (instance +Y).
    pub facing: Vector3<f64>,
    /// Hand direction (instance +X).
    pub hand: Vector3<f64>,
    /// Host face normal.
    pub normal: Vector3<f64>,
}

impl OrientationFrame {
    /// Create a frame from its three axes.
    #[must_use]
    pub const fn new(facing: Vector3<f64>, hand: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            facing,
            hand,
            normal,
        }
    }

    /// The frame mirrored across the host face (facing and hand negated).
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            facing: -self.facing,
            hand: -self.hand,
            normal: self.normal,
        }
    }

    /// Maximum absolute pairwise dot product of the three axes.
    ///
    /// Zero for a perfectly orthogonal frame; useful for asserting how
    /// degraded a best-effort frame is.
    #[must_use]
    pub fn max_skew(&self) -> f64 {
        let fh = self.facing.dot(&self.hand).abs();
        let fn_ = self.facing.dot(&self.normal).abs();
        let hn = self.hand.dot(&self.normal).abs();
        fh.max(fn_).max(hn)
    }
}
