//! Unit travel tangents and angle normalization.
//!
//! Every edge heading and endpoint tangent in the network is a [`Direction`]:
//! a vector whose unit length is guaranteed by construction.  Keeping the
//! invariant in the type means the solver never re-normalizes and dot
//! products are directly comparable against angular tolerances.

use std::f64::consts::{PI, TAU};
use std::fmt;

use thiserror::Error;

use crate::Vec2;

/// A guaranteed-unit vector in the horizontal plane.
///
/// Construct via [`Direction::from_vec`] (fallible, normalizes) or
/// [`Direction::from_angle`]; the inner vector is never exposed mutably.
/// Deserialization goes through [`TryFrom<Vec2>`], so decoded data is held
/// to the same unit invariant as constructed values.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec2"))]
pub struct Direction(Vec2);

impl Direction {
    pub const EAST: Direction = Direction(Vec2 { x: 1.0, y: 0.0 });
    pub const NORTH: Direction = Direction(Vec2 { x: 0.0, y: 1.0 });
    pub const WEST: Direction = Direction(Vec2 { x: -1.0, y: 0.0 });
    pub const SOUTH: Direction = Direction(Vec2 { x: 0.0, y: -1.0 });

    /// Normalize `v` into a direction.  Returns `None` for vectors too short
    /// to carry a meaningful heading (length below 1e-12) and for vectors
    /// whose length is not finite.
    pub fn from_vec(v: Vec2) -> Option<Direction> {
        let len = v.length();
        if !len.is_finite() || len < 1e-12 {
            return None;
        }
        Some(Direction(Vec2::new(v.x / len, v.y / len)))
    }

    /// Direction at `radians` counter-clockwise from the +x axis.
    #[inline]
    pub fn from_angle(radians: f64) -> Direction {
        Direction(Vec2::new(radians.cos(), radians.sin()))
    }

    #[inline]
    pub fn as_vec(self) -> Vec2 {
        self.0
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Polar angle in `(-π, π]`.
    ///
    /// `atan2` alone returns `-π` for headings with a negative-zero y
    /// component; folding that onto `+π` keeps formatted output and angle
    /// comparisons single-valued.
    #[inline]
    pub fn angle(self) -> f64 {
        let a = self.0.y.atan2(self.0.x);
        if a <= -PI { a + TAU } else { a }
    }

    #[inline]
    pub fn dot(self, other: Direction) -> f64 {
        self.0.dot(other.0)
    }

    /// Quarter turn counter-clockwise.
    #[inline]
    pub fn left90(self) -> Direction {
        Direction(self.0.left90())
    }

    /// Quarter turn clockwise.
    #[inline]
    pub fn right90(self) -> Direction {
        Direction(Vec2::new(self.0.y, -self.0.x))
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Direction(-self.0)
    }

    /// Absolute angular separation from `other`, in `[0, π]`.
    ///
    /// Computed as `atan2(|cross|, dot)`, which keeps full precision for
    /// near-parallel directions where an `acos` of the dot product would
    /// round to zero.
    #[inline]
    pub fn angle_to(self, other: Direction) -> f64 {
        let cross = self.0.x * other.0.y - self.0.y * other.0.x;
        let dot = self.dot(other);
        cross.atan2(dot).abs()
    }

    /// True when the two headings differ by at most `epsilon` radians.
    #[inline]
    pub fn approx_eq(self, other: Direction, epsilon: f64) -> bool {
        self.angle_to(other) <= epsilon
    }
}

/// A vector [`Direction::from_vec`] refuses to normalize: shorter than the
/// 1e-12 floor, or with a non-finite length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("vector cannot be normalized into a unit direction")]
pub struct DegenerateDirection;

impl TryFrom<Vec2> for Direction {
    type Error = DegenerateDirection;

    /// Fallible, normalizing conversion.  Also the deserialization path, so
    /// a heading read from external data is normalized or rejected.
    fn try_from(v: Vec2) -> Result<Direction, DegenerateDirection> {
        Direction::from_vec(v).ok_or(DegenerateDirection)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.4} rad", self.angle())
    }
}

/// Wrap an angle into the half-open interval `(-π, π]`.
pub fn wrap_angle(radians: f64) -> f64 {
    let mut a = radians % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}
