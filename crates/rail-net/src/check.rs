//! Connected-component consistency checking and deterministic dumps.
//!
//! The checker walks one component breadth-first and validates every
//! structural invariant the mutation paths are supposed to preserve.  It
//! exists to catch gateway bugs early: a failure is a programming error, not
//! a placement the player can fix, so callers typically assert on the
//! result in debug builds and after save-file loads.

use std::collections::VecDeque;
use std::fmt::Write as _;

use rustc_hash::FxHashSet;

use rail_core::{NodeId, PieceId};

use crate::{NetError, NetResult, RailNetwork, TrackPiece};

impl RailNetwork {
    /// Validate every invariant of the connected component containing
    /// `start`:
    ///
    /// - no two edges at one node within the angular tolerance of each other,
    /// - every edge references a live piece and a live neighbor,
    /// - every edge has exactly one reciprocal entry pointing back,
    /// - edge neighbors match the piece's far anchor,
    /// - stored headings match the piece shape's tangents at the node,
    /// - piece shapes start and end on their anchor nodes, with anchor
    ///   tangents matching the shape.
    ///
    /// Returns the first violation found as
    /// [`NetError::InconsistentNetwork`](crate::NetError::InconsistentNetwork)
    /// (also logged at `error` level), or
    /// [`NetError::NodeNotFound`](crate::NetError::NodeNotFound) for a stale
    /// `start` handle.
    pub fn check(&self, start: NodeId) -> NetResult<()> {
        if self.node(start).is_none() {
            return Err(NetError::NodeNotFound(start));
        }
        let epsilon = self.config.angle_epsilon;

        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut checked_pieces: FxHashSet<PieceId> = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                return Err(self.violation(id, "visited node vanished mid-walk".to_string()));
            };

            for (i, a) in node.edges().iter().enumerate() {
                for b in &node.edges()[i + 1..] {
                    if a.direction.approx_eq(b.direction, epsilon) {
                        return Err(self.violation(
                            id,
                            format!(
                                "edges toward {} and {} share heading {}",
                                a.neighbor, b.neighbor, a.direction
                            ),
                        ));
                    }
                }
            }

            for edge in node.edges() {
                let Some(piece) = self.piece(edge.piece) else {
                    return Err(
                        self.violation(id, format!("edge references freed {}", edge.piece))
                    );
                };
                let Some(neighbor) = self.node(edge.neighbor) else {
                    return Err(
                        self.violation(id, format!("edge references freed {}", edge.neighbor))
                    );
                };

                if piece.other_end(id) != Some(edge.neighbor) {
                    return Err(self.violation(
                        id,
                        format!("edge neighbor {} is not {}'s far anchor", edge.neighbor, edge.piece),
                    ));
                }

                // Exactly one reciprocal entry, pointing back here.
                let mut back = neighbor.edges().iter().filter(|e| e.piece == edge.piece);
                let Some(reciprocal) = back.next() else {
                    return Err(self.violation(
                        edge.neighbor,
                        format!("missing reciprocal edge for {}", edge.piece),
                    ));
                };
                if back.next().is_some() {
                    return Err(self.violation(
                        edge.neighbor,
                        format!("multiple edges reference {}", edge.piece),
                    ));
                }
                if reciprocal.neighbor != id {
                    return Err(self.violation(
                        edge.neighbor,
                        format!("reciprocal edge for {} points at {}", edge.piece, reciprocal.neighbor),
                    ));
                }

                // Stored heading vs. the shape's outward tangent on this side.
                match piece.heading_from(id) {
                    Some(expected) if edge.direction.approx_eq(expected, epsilon) => {}
                    Some(expected) => {
                        return Err(self.violation(
                            id,
                            format!(
                                "edge heading {} disagrees with {} tangent {}",
                                edge.direction, edge.piece, expected
                            ),
                        ));
                    }
                    None => {
                        return Err(self.violation(
                            id,
                            format!("{} is not anchored at this node", edge.piece),
                        ));
                    }
                }

                if checked_pieces.insert(edge.piece) {
                    self.check_piece(edge.piece, piece)?;
                }
                if visited.insert(edge.neighbor) {
                    queue.push_back(edge.neighbor);
                }
            }
        }
        Ok(())
    }

    /// Shape-level invariants for one piece: endpoints on the anchor nodes,
    /// anchor tangents matching the shape, positive extent.
    fn check_piece(&self, id: PieceId, piece: &TrackPiece) -> NetResult<()> {
        let epsilon = self.config.angle_epsilon;
        let pos_epsilon = self.config.pos_epsilon;
        let at = piece.start.node;

        if piece.length() <= 0.0 {
            return Err(self.violation(at, format!("{id} has non-positive length")));
        }

        for (anchor, point, tangent, label) in [
            (piece.start, piece.shape.start_point(), piece.shape.start_direction(), "start"),
            (piece.end, piece.shape.end_point(), piece.shape.end_direction(), "end"),
        ] {
            let Some(node) = self.node(anchor.node) else {
                return Err(self.violation(at, format!("{id} {label} anchored to freed {}", anchor.node)));
            };
            if node.position.distance(point) > pos_epsilon {
                return Err(self.violation(
                    anchor.node,
                    format!("{id} {label} lies {} but shape evaluates to {}", node.position, point),
                ));
            }
            if !anchor.direction.approx_eq(tangent, epsilon) {
                return Err(self.violation(
                    anchor.node,
                    format!(
                        "{id} {label} anchor tangent {} disagrees with shape tangent {}",
                        anchor.direction, tangent
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Deterministic description of the connected component containing
    /// `start`, in the same breadth-first discovery order [`check`] uses.
    ///
    /// One line per node, one indented line per edge.  Stable across runs
    /// for identical placement histories, which makes it usable both for
    /// troubleshooting logs and for snapshot assertions in tests.
    ///
    /// [`check`]: RailNetwork::check
    pub fn dump(&self, start: NodeId) -> String {
        let mut out = String::new();
        if self.node(start).is_none() {
            let _ = writeln!(out, "{start} not found");
            return out;
        }

        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else { continue };
            let _ = writeln!(
                out,
                "node {id} at ({:.2}, {:.2}) degree {}",
                node.position.x,
                node.position.y,
                node.degree()
            );
            for edge in node.edges() {
                let _ = writeln!(
                    out,
                    "  -> {} via {} heading {}",
                    edge.neighbor, edge.piece, edge.direction
                );
                if visited.insert(edge.neighbor) {
                    queue.push_back(edge.neighbor);
                }
            }
        }
        out
    }
}
