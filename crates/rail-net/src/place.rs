//! Placement gateway: the sole growth and demolition entry point.
//!
//! `place` runs in three strict stages: resolve both endpoints against the
//! store (snapping free ones), solve the shape as a pure function, then
//! validate both endpoint headings before any mutation.  Only a fully
//! validated placement commits, so any error leaves the store exactly as it
//! was.  `remove` mirrors it for demolition, dropping junctions that end up
//! with no track.

use tracing::debug;

use rail_core::{Direction, NodeId, PieceId, TrackType, Vec2};
use rail_geom::{GeomError, solve};

use crate::{NetError, NetResult, RailNetwork, RailNode, TrackPiece};

/// One endpoint of a placement request.
#[derive(Copy, Clone, Debug)]
pub enum Endpoint {
    /// A free point in the world.  Snaps to an existing node within the
    /// merge radius, otherwise a new node is created there.  The travel
    /// tangent is left to the solver.
    Free(Vec2),
    /// Continue from an existing node with a pinned travel tangent: the
    /// leave tangent when used as a start, the arrival tangent when used as
    /// an end.
    Node { node: NodeId, direction: Direction },
}

/// An endpoint after resolution against the store.
#[derive(Copy, Clone)]
struct Resolved {
    /// Existing node to attach to, if any.
    attach: Option<NodeId>,
    pos: Vec2,
    fixed: Option<Direction>,
}

impl RailNetwork {
    fn resolve(&self, endpoint: Endpoint) -> NetResult<Resolved> {
        match endpoint {
            Endpoint::Node { node, direction } => {
                let n = self.node(node).ok_or(NetError::NodeNotFound(node))?;
                Ok(Resolved { attach: Some(node), pos: n.position, fixed: Some(direction) })
            }
            Endpoint::Free(pos) => match self.snap(pos) {
                Some((id, snapped)) => {
                    Ok(Resolved { attach: Some(id), pos: snapped, fixed: None })
                }
                None => Ok(Resolved { attach: None, pos, fixed: None }),
            },
        }
    }

    /// Atomically place one track piece between two endpoints.
    ///
    /// On success the piece, its (up to two) new junction nodes, and both
    /// reciprocal edges exist; on any error nothing does.  Errors, in the
    /// order they are detected:
    ///
    /// - [`NetError::NodeNotFound`] for a request naming a stale node,
    /// - [`NetError::Geometry`] when no shape fits the constraints,
    /// - [`NetError::DuplicateDirection`] when either endpoint's outward
    ///   heading collides with an existing edge at its node.
    pub fn place(
        &mut self,
        start: Endpoint,
        end: Endpoint,
        track_type: &TrackType,
    ) -> NetResult<PieceId> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        if let (Some(a), Some(b)) = (start.attach, end.attach) {
            if a == b {
                return Err(NetError::Geometry(GeomError::DegenerateGeometry(
                    "both endpoints resolve to the same node",
                )));
            }
        }

        // Pure fit; the store is untouched until it succeeds.
        let shape = solve::plan_shape(
            solve::Endpoint { pos: start.pos, dir: start.fixed },
            solve::Endpoint { pos: end.pos, dir: end.fixed },
            track_type,
            &self.config,
        )?;

        let start_dir = shape.start_direction();
        let end_dir = shape.end_direction();
        // Outward headings: enter forward from the start, backward from the end.
        let out_start = start_dir;
        let out_end = end_dir.opposite();

        // Both duplicate checks run before the first mutation so a clash at
        // the far end cannot leave a half-registered piece behind.
        for (attach, heading) in [(start.attach, out_start), (end.attach, out_end)] {
            if let Some(id) = attach {
                if let Some(node) = self.node(id) {
                    if node.edge_towards(heading, self.config.angle_epsilon).is_some() {
                        return Err(NetError::DuplicateDirection { node: id, heading });
                    }
                }
            }
        }

        // Commit.
        let created_start = start.attach.is_none();
        let created_end = end.attach.is_none();
        let start_node = match start.attach {
            Some(id) => id,
            None => self.insert_node(start.pos),
        };
        let end_node = match end.attach {
            Some(id) => id,
            None => self.insert_node(end.pos),
        };

        let length = shape.length();
        let kind = shape.kind();
        let piece_id = self.insert_piece(TrackPiece {
            track_type: track_type.id,
            start: RailNode { node: start_node, direction: start_dir },
            end: RailNode { node: end_node, direction: end_dir },
            shape,
        });

        // Pre-validated above; failure here means validation and
        // registration drifted apart, so undo everything before reporting.
        if let Err(e) = self.add_edge(start_node, out_start, end_node, piece_id) {
            self.rollback(piece_id, None, created_start, start_node, created_end, end_node);
            return Err(e);
        }
        if let Err(e) = self.add_edge(end_node, out_end, start_node, piece_id) {
            self.rollback(piece_id, Some(start_node), created_start, start_node, created_end, end_node);
            return Err(e);
        }

        debug!(
            "placed {piece_id}: {kind} {length:.1} m, {start_node} -> {end_node} ({})",
            track_type.name
        );
        Ok(piece_id)
    }

    fn rollback(
        &mut self,
        piece: PieceId,
        registered_at: Option<NodeId>,
        created_start: bool,
        start_node: NodeId,
        created_end: bool,
        end_node: NodeId,
    ) {
        if let Some(node) = registered_at {
            let _ = self.remove_edge(node, piece);
        }
        let _ = self.take_piece(piece);
        if created_start {
            self.discard_node(start_node);
        }
        if created_end {
            self.discard_node(end_node);
        }
    }

    /// Atomically remove a placed piece.
    ///
    /// Unregisters both of its edges, frees its slot, and discards any
    /// junction node left with no track.  Stale ids fail with
    /// [`NetError::PieceNotFound`] and change nothing.
    pub fn remove(&mut self, piece: PieceId) -> NetResult<()> {
        let (start_node, end_node) = match self.piece(piece) {
            Some(p) => (p.start.node, p.end.node),
            None => return Err(NetError::PieceNotFound(piece)),
        };

        self.remove_edge(start_node, piece)?;
        self.remove_edge(end_node, piece)?;
        let _ = self.take_piece(piece);

        if self.degree(start_node) == 0 {
            self.discard_node(start_node);
        }
        if self.degree(end_node) == 0 {
            self.discard_node(end_node);
        }

        debug!("removed {piece}: {start_node} -> {end_node}");
        Ok(())
    }
}
