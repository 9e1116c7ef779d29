//! Track pieces and their endpoint anchors.

use rail_core::{Direction, NodeId, TrackType, TrackTypeId, Vec2};
use rail_geom::TrackShape;

/// One endpoint anchor of a piece: the junction node it is bound to plus
/// the travel tangent there.
///
/// Both anchors face along increasing arc length: `start.direction` is the
/// tangent a train *leaves* the start node with, `end.direction` the tangent
/// it *arrives* at the end node with.  The edge entries the node store keeps
/// use the opposite convention (headings away from the node); see
/// [`TrackPiece::heading_from`] for the translation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RailNode {
    pub node: NodeId,
    pub direction: Direction,
}

/// One drivable track segment between two junction nodes.
///
/// The shape is solved once at placement and immutable afterwards; trains
/// and the renderer only ever evaluate it.  Anchors always name two distinct
/// nodes: a piece returning to its own start node would need a full-circle
/// sweep, which the solver rejects.
#[derive(Clone, Debug)]
pub struct TrackPiece {
    pub track_type: TrackTypeId,
    pub start: RailNode,
    pub end: RailNode,
    pub shape: TrackShape,
}

impl TrackPiece {
    #[inline]
    pub fn length(&self) -> f64 {
        self.shape.length()
    }

    /// Position `s` metres along the piece from its start anchor.
    #[inline]
    pub fn point_at(&self, s: f64) -> Vec2 {
        self.shape.point_at(s)
    }

    /// Travel tangent `s` metres along the piece.
    #[inline]
    pub fn direction_at(&self, s: f64) -> Direction {
        self.shape.direction_at(s)
    }

    /// Heading a train standing at `node` takes to enter this piece, or
    /// `None` when the piece is not anchored there.
    ///
    /// Entering from the start means driving forward along the start
    /// tangent; entering from the end means driving the piece backwards,
    /// against the arrival tangent.
    pub fn heading_from(&self, node: NodeId) -> Option<Direction> {
        if self.start.node == node {
            Some(self.start.direction)
        } else if self.end.node == node {
            Some(self.end.direction.opposite())
        } else {
            None
        }
    }

    /// The anchor node opposite `node`, or `None` when the piece is not
    /// anchored there.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.start.node == node {
            Some(self.end.node)
        } else if self.end.node == node {
            Some(self.start.node)
        } else {
            None
        }
    }

    /// Construction cost of this piece under its track class constants.
    #[inline]
    pub fn cost(&self, track_type: &TrackType) -> f64 {
        track_type.cost_of(self.length())
    }

    /// Speed limit for trains on this piece, in metres per second.
    #[inline]
    pub fn speed_limit(&self, track_type: &TrackType) -> f64 {
        track_type.max_speed
    }
}
