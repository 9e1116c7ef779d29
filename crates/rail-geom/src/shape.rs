//! Solved track shapes and their arc-length parameterization.
//!
//! A shape is a self-contained description of one piece's centreline.  The
//! evaluation contract is shared by both primitives: `point_at(0.0)` and
//! `direction_at(0.0)` are the start pose, `point_at(length())` and
//! `direction_at(length())` the end pose, and directions always face along
//! increasing arc length.  The parameter is not clamped; values outside
//! `[0, length]` extrapolate along the same line or circle, and callers that
//! walk trains along a piece clamp before evaluating.

use rail_core::{Direction, ShapeKind, Vec2, wrap_angle};

// ── Turn sense ────────────────────────────────────────────────────────────────

/// Which way an arc bends, seen from above.  `Left` is counter-clockwise.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Sign of the angular velocity while driving the arc: `+1.0` for
    /// counter-clockwise, `-1.0` for clockwise.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Turn {
        match self {
            Turn::Left => Turn::Right,
            Turn::Right => Turn::Left,
        }
    }
}

// ── Straight ──────────────────────────────────────────────────────────────────

/// A straight segment from `origin`, `length` metres along `direction`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StraightShape {
    pub origin: Vec2,
    pub direction: Direction,
    /// Metres; always positive for solved shapes.
    pub length: f64,
}

impl StraightShape {
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn point_at(&self, s: f64) -> Vec2 {
        self.origin + self.direction.as_vec() * s
    }

    #[inline]
    pub fn direction_at(&self, _s: f64) -> Direction {
        self.direction
    }

    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.point_at(self.length)
    }

    #[inline]
    pub fn end_direction(&self) -> Direction {
        self.direction
    }

    /// The same segment driven the other way.
    pub fn reversed(self) -> StraightShape {
        StraightShape {
            origin: self.end_point(),
            direction: self.direction.opposite(),
            length: self.length,
        }
    }
}

// ── Circular arc ──────────────────────────────────────────────────────────────

/// A circular arc, tangent-continuous with whatever it was solved against.
///
/// `start_angle` is the polar angle of the radius vector centre → start
/// point; driving the arc moves that angle by `turn.sign()` radians per
/// `1/radius` metres, through a total of `sweep` radians.  Invariants held
/// by every solved arc: `radius > 0` and `0 < sweep < 2π`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcShape {
    pub center: Vec2,
    /// Metres; always positive, the turn side lives in `turn`.
    pub radius: f64,
    /// Polar angle of centre → start, in radians.
    pub start_angle: f64,
    /// Angular extent in radians, measured along the turn direction.
    pub sweep: f64,
    pub turn: Turn,
}

impl ArcShape {
    #[inline]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep
    }

    /// Polar angle of centre → end point.  Not wrapped; feed it to
    /// `cos`/`sin` or wrap before comparing.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.turn.sign() * self.sweep
    }

    #[inline]
    fn angle_at(&self, s: f64) -> f64 {
        self.start_angle + self.turn.sign() * s / self.radius
    }

    #[inline]
    pub fn point_at(&self, s: f64) -> Vec2 {
        let a = self.angle_at(s);
        self.center + Vec2::new(a.cos(), a.sin()) * self.radius
    }

    /// Travel tangent `s` metres along: the radial direction turned a
    /// quarter towards the drive sense.
    #[inline]
    pub fn direction_at(&self, s: f64) -> Direction {
        let radial = Direction::from_angle(self.angle_at(s));
        match self.turn {
            Turn::Left => radial.left90(),
            Turn::Right => radial.right90(),
        }
    }

    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.point_at(self.length())
    }

    #[inline]
    pub fn end_direction(&self) -> Direction {
        self.direction_at(self.length())
    }

    /// The same arc driven the other way: starts at the old end, sweeps the
    /// opposite sense over the same circle.
    pub fn reversed(self) -> ArcShape {
        ArcShape {
            center: self.center,
            radius: self.radius,
            start_angle: wrap_angle(self.end_angle()),
            sweep: self.sweep,
            turn: self.turn.flipped(),
        }
    }
}

// ── Shape enum ────────────────────────────────────────────────────────────────

/// Either solved centreline primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackShape {
    Straight(StraightShape),
    Arc(ArcShape),
}

impl TrackShape {
    /// Classification tag for generator dispatch.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            TrackShape::Straight(_) => ShapeKind::Straight,
            TrackShape::Arc(_) => ShapeKind::Circular,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        match self {
            TrackShape::Straight(s) => s.length(),
            TrackShape::Arc(a) => a.length(),
        }
    }

    /// Position `s` metres from the start.
    #[inline]
    pub fn point_at(&self, s: f64) -> Vec2 {
        match self {
            TrackShape::Straight(shape) => shape.point_at(s),
            TrackShape::Arc(shape) => shape.point_at(s),
        }
    }

    /// Travel tangent `s` metres from the start.
    #[inline]
    pub fn direction_at(&self, s: f64) -> Direction {
        match self {
            TrackShape::Straight(shape) => shape.direction_at(s),
            TrackShape::Arc(shape) => shape.direction_at(s),
        }
    }

    #[inline]
    pub fn start_point(&self) -> Vec2 {
        self.point_at(0.0)
    }

    #[inline]
    pub fn start_direction(&self) -> Direction {
        self.direction_at(0.0)
    }

    #[inline]
    pub fn end_point(&self) -> Vec2 {
        match self {
            TrackShape::Straight(shape) => shape.end_point(),
            TrackShape::Arc(shape) => shape.end_point(),
        }
    }

    #[inline]
    pub fn end_direction(&self) -> Direction {
        match self {
            TrackShape::Straight(shape) => shape.end_direction(),
            TrackShape::Arc(shape) => shape.end_direction(),
        }
    }

    /// The same centreline driven the other way.
    pub fn reversed(self) -> TrackShape {
        match self {
            TrackShape::Straight(shape) => TrackShape::Straight(shape.reversed()),
            TrackShape::Arc(shape) => TrackShape::Arc(shape.reversed()),
        }
    }
}
