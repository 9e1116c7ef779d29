//! Geometry-solver error type.

use thiserror::Error;

/// Errors produced by `rail-geom` shape fitting.
///
/// All variants describe a constraint set no shape can satisfy; none of them
/// indicates internal failure.  Callers surface them to the player verbatim
/// (a placement UI turns them into "can't build here" feedback).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// No finite, drivable shape fits the endpoints: coincident points, a
    /// target on the start tangent line, a turn radius beyond the flat
    /// limit, or a sweep collapsing to a point or closing a full circle.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("solved turn radius {radius:.2} m is under the track class minimum {min_radius:.2} m")]
    RadiusTooSmall { radius: f64, min_radius: f64 },

    /// A fixed endpoint tangent misses the tangent the solved shape would
    /// need there.
    #[error("fixed endpoint tangent off by {deviation_rad:.5} rad")]
    DirectionMismatch { deviation_rad: f64 },
}

pub type GeomResult<T> = Result<T, GeomError>;
