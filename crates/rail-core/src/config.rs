//! Geometric tolerance and feasibility settings.
//!
//! Every tolerance the solver and the network store consult lives in one
//! explicit [`GeometryConfig`] value that callers pass down.  Nothing reads
//! process-wide state, so embedders can tune tolerances per save file and
//! tests can tighten or loosen them locally.

/// Tolerances and limits for shape solving and network placement.
///
/// The [`Default`] values suit metre-scaled maps; construct with struct
/// update syntax to override individual fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryConfig {
    /// Angular tolerance in radians for heading equality.  Governs both
    /// duplicate-heading rejection at a node and fixed-endpoint tangent
    /// matching; two headings closer than this count as the same.
    pub angle_epsilon: f64,

    /// Positional tolerance in metres for coincidence checks between solved
    /// shapes and the node positions they claim to touch.
    pub pos_epsilon: f64,

    /// Free placement endpoints within this distance of an existing node
    /// attach to that node instead of creating a new one.
    pub merge_radius: f64,

    /// Targets whose lateral offset from the start tangent line is below
    /// this are treated as collinear: no finite tangent circle exists and
    /// the fit degenerates to a straight.
    pub lateral_epsilon: f64,

    /// Solved turn radii above this are indistinguishable from straight
    /// track; the arc fit reports degenerate geometry instead of emitting a
    /// kilometre-wide circle.
    pub max_radius: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            angle_epsilon:   1e-3,
            pos_epsilon:     1e-3,
            merge_radius:    0.25,
            lateral_epsilon: 1e-9,
            max_radius:      10_000.0,
        }
    }
}
