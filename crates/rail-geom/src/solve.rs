//! Tangent-constrained shape fitting.
//!
//! # The arc fit
//!
//! Given a start point `P0` with travel tangent `D0` and a target point
//! `P1`, the centre of any circle tangent to `D0` at `P0` lies on the start
//! normal `N0 = left90(D0)` at distance `r`.  Requiring `P1` on the same
//! circle (`|P1 - C| = |r|` with `C = P0 + r·N0`) collapses to one linear
//! equation in `r`:
//!
//! ```text
//! r = |V|² / (2 · (V · N0))        where V = P1 - P0
//! ```
//!
//! The sign of `r` carries the turn side: positive means the centre sits to
//! the left of travel (a counter-clockwise arc), negative to the right.  A
//! vanishing denominator means `P1` lies on the start tangent line and no
//! finite circle exists; the planner falls back to a straight when the
//! target is dead ahead.
//!
//! All fits are pure functions of their arguments plus a [`GeometryConfig`];
//! nothing here touches the network store.

use std::f64::consts::TAU;

use rail_core::{Direction, GeometryConfig, TrackType, Vec2};

use crate::{ArcShape, GeomError, GeomResult, StraightShape, TrackShape, Turn};

// ── Endpoint constraints ──────────────────────────────────────────────────────

/// One endpoint constraint for the planner: a position, optionally pinned to
/// a travel tangent (the case when the end continues existing track).
#[derive(Copy, Clone, Debug)]
pub struct Endpoint {
    pub pos: Vec2,
    /// Required travel tangent at `pos`: the leave tangent for a start
    /// endpoint, the arrival tangent for an end endpoint.
    pub dir: Option<Direction>,
}

impl Endpoint {
    #[inline]
    pub fn free(pos: Vec2) -> Self {
        Self { pos, dir: None }
    }

    #[inline]
    pub fn anchored(pos: Vec2, dir: Direction) -> Self {
        Self { pos, dir: Some(dir) }
    }
}

// ── Straight fit ──────────────────────────────────────────────────────────────

/// Fit the straight segment from `p0` to `p1`.
///
/// The travel direction is derived from the endpoints; any fixed tangent
/// (start or arrival) must then agree with it within
/// `config.angle_epsilon`, or the fit fails with
/// [`GeomError::DirectionMismatch`].  Endpoints closer than
/// `config.pos_epsilon` are degenerate.
pub fn solve_straight(
    p0: Vec2,
    fixed_start: Option<Direction>,
    p1: Vec2,
    fixed_end: Option<Direction>,
    config: &GeometryConfig,
) -> GeomResult<StraightShape> {
    let v = p1 - p0;
    let length = v.length();
    if length < config.pos_epsilon {
        return Err(GeomError::DegenerateGeometry("endpoints coincide"));
    }
    let direction = Direction::from_vec(v)
        .ok_or(GeomError::DegenerateGeometry("endpoints coincide"))?;

    for fixed in [fixed_start, fixed_end].into_iter().flatten() {
        let deviation = fixed.angle_to(direction);
        if deviation > config.angle_epsilon {
            return Err(GeomError::DirectionMismatch { deviation_rad: deviation });
        }
    }

    Ok(StraightShape { origin: p0, direction, length })
}

// ── Arc fit ───────────────────────────────────────────────────────────────────

/// Fit the circular arc that leaves `p0` along `d0` and reaches `p1`.
///
/// Fails with [`GeomError::DegenerateGeometry`] when no finite arc exists
/// (coincident endpoints, a collinear target, a radius beyond
/// `config.max_radius`, or a sweep collapsing to a point or a full circle),
/// with [`GeomError::RadiusTooSmall`] when the unique solution turns
/// tighter than `track_type.min_radius`, and with
/// [`GeomError::DirectionMismatch`] when `fixed_end` disagrees with the
/// solved arrival tangent.
pub fn solve_arc(
    p0: Vec2,
    d0: Direction,
    p1: Vec2,
    fixed_end: Option<Direction>,
    track_type: &TrackType,
    config: &GeometryConfig,
) -> GeomResult<ArcShape> {
    let v = p1 - p0;
    if v.length() < config.pos_epsilon {
        return Err(GeomError::DegenerateGeometry("endpoints coincide"));
    }

    let n0 = d0.left90();
    // Signed distance of the target from the start tangent line.
    let lateral = v.dot(n0.as_vec());
    if lateral.abs() < config.lateral_epsilon {
        return Err(GeomError::DegenerateGeometry("target lies on the start tangent line"));
    }

    let r = v.length_sq() / (2.0 * lateral);
    if r.abs() > config.max_radius {
        return Err(GeomError::DegenerateGeometry("turn radius beyond the flat limit"));
    }
    if r.abs() < track_type.min_radius {
        return Err(GeomError::RadiusTooSmall {
            radius: r.abs(),
            min_radius: track_type.min_radius,
        });
    }

    let center = p0 + n0.as_vec() * r;
    let turn = if r > 0.0 { Turn::Left } else { Turn::Right };
    let start_angle = (p0 - center).angle();
    let sweep = sweep_towards((p1 - center).angle() - start_angle, turn);
    if sweep < config.angle_epsilon || sweep > TAU - config.angle_epsilon {
        return Err(GeomError::DegenerateGeometry("sweep collapses to a point or a full circle"));
    }

    let arc = ArcShape { center, radius: r.abs(), start_angle, sweep, turn };
    debug_assert!(arc.direction_at(0.0).approx_eq(d0, config.angle_epsilon));

    if let Some(required) = fixed_end {
        let deviation = arc.end_direction().angle_to(required);
        if deviation > config.angle_epsilon {
            return Err(GeomError::DirectionMismatch { deviation_rad: deviation });
        }
    }

    Ok(arc)
}

/// Fold a raw end-minus-start angle difference into the sweep magnitude for
/// `turn`: the angular distance travelled when driving in the turn sense,
/// in `[0, 2π)`.
#[inline]
fn sweep_towards(raw: f64, turn: Turn) -> f64 {
    (raw * turn.sign()).rem_euclid(TAU)
}

impl ArcShape {
    /// Re-derive the tangent circle from this arc's own endpoints and the
    /// claimed start pose, and confirm the stored centre, radius, and turn
    /// reproduce within tolerance.
    ///
    /// A cheap structural audit used by tests and debug assertions; a false
    /// return means the arc was tampered with or the fit and the evaluation
    /// have drifted apart.
    #[must_use]
    pub fn self_check(&self, p0: Vec2, d0: Direction, config: &GeometryConfig) -> bool {
        if self.point_at(0.0).distance(p0) > config.pos_epsilon {
            return false;
        }
        if !self.direction_at(0.0).approx_eq(d0, config.angle_epsilon) {
            return false;
        }

        let v = self.end_point() - p0;
        let lateral = v.dot(d0.left90().as_vec());
        if lateral.abs() < config.lateral_epsilon {
            return false;
        }
        let r = v.length_sq() / (2.0 * lateral);
        let center = p0 + d0.left90().as_vec() * r;
        let turn = if r > 0.0 { Turn::Left } else { Turn::Right };

        turn == self.turn
            && (r.abs() - self.radius).abs() <= config.pos_epsilon
            && center.distance(self.center) <= config.pos_epsilon
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Solve the shape connecting two endpoint constraints.
///
/// | start tangent | end tangent | strategy                                        |
/// |---------------|-------------|-------------------------------------------------|
/// | free          | free        | straight, direction derived from the endpoints  |
/// | fixed         | any         | arc from the start; straight when collinear     |
/// | free          | fixed       | arc fitted backwards from the end, then flipped |
///
/// The collinear fallback only engages on [`GeomError::DegenerateGeometry`];
/// radius and tangent failures propagate so the caller can report why the
/// placement is impossible rather than silently building something else.
pub fn plan_shape(
    start: Endpoint,
    end: Endpoint,
    track_type: &TrackType,
    config: &GeometryConfig,
) -> GeomResult<TrackShape> {
    match (start.dir, end.dir) {
        (None, None) => {
            solve_straight(start.pos, None, end.pos, None, config).map(TrackShape::Straight)
        }
        (Some(d0), fixed_end) => {
            match solve_arc(start.pos, d0, end.pos, fixed_end, track_type, config) {
                Ok(arc) => Ok(TrackShape::Arc(arc)),
                Err(GeomError::DegenerateGeometry(_)) => {
                    solve_straight(start.pos, Some(d0), end.pos, fixed_end, config)
                        .map(TrackShape::Straight)
                }
                Err(e) => Err(e),
            }
        }
        (None, Some(d1)) => {
            // Drive out of the anchored end against its arrival tangent,
            // then flip the solved arc back into forward orientation.
            match solve_arc(end.pos, d1.opposite(), start.pos, None, track_type, config) {
                Ok(arc) => Ok(TrackShape::Arc(arc.reversed())),
                Err(GeomError::DegenerateGeometry(_)) => {
                    solve_straight(start.pos, None, end.pos, Some(d1), config)
                        .map(TrackShape::Straight)
                }
                Err(e) => Err(e),
            }
        }
    }
}
