//! Tuning parameters for placement resolution.

/// Millimeters per foot, the host document's internal length unit.
pub const MM_PER_FOOT: f64 = 304.8;

/// Parameters controlling proximity search and orientation resolution.
///
/// Defaults reproduce the host document's historical behavior: a
/// 1000 mm face search radius, a 5 ft host element search radius and a
/// near-zero tolerance for curve host probing.
///
/// # Example
///
/// ```
/// use placement_resolve::ResolveParams;
///
/// let params = ResolveParams::default();
/// assert!((params.face_search_radius - 1000.0 / 304.8).abs() < 1e-12);
///
/// // Search further for a host face.
/// let wide = ResolveParams::default().face_search_radius(10.0);
/// assert!((wide.face_search_radius - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ResolveParams {
    /// Radius for host face search, in feet (default 1000 mm).
    pub face_search_radius: f64,

    /// Radius for host element search, in feet.
    pub element_search_radius: f64,

    /// Radius for the tight face probe at a curve midpoint. Effectively
    /// "touching only"; a miss selects the host-free fallback path.
    pub curve_host_tolerance: f64,

    /// Tolerance for the orthogonality and right-hand-rule checks.
    pub orientation_tolerance: f64,
}

impl Default for ResolveParams {
    fn default() -> Self {
        Self {
            face_search_radius: 1000.0 / MM_PER_FOOT,
            element_search_radius: 5.0,
            curve_host_tolerance: 1e-5,
            orientation_tolerance: 1e-6,
        }
    }
}

impl ResolveParams {
    /// Set the host face search radius (feet).
    #[must_use]
    pub const fn face_search_radius(mut self, radius: f64) -> Self {
        self.face_search_radius = radius;
        self
    }

    /// Set the host element search radius (feet).
    #[must_use]
    pub const fn element_search_radius(mut self, radius: f64) -> Self {
        self.element_search_radius = radius;
        self
    }

    /// Set the curve midpoint probe radius.
    #[must_use]
    pub const fn curve_host_tolerance(mut self, tolerance: f64) -> Self {
        self.curve_host_tolerance = tolerance;
        self
    }

    /// Set the orientation check tolerance.
    #[must_use]
    pub const fn orientation_tolerance(mut self, tolerance: f64) -> Self {
        self.orientation_tolerance = tolerance;
        self
    }
}
