//! Rail network store: node and piece arenas plus the spatial index.
//!
//! # Data layout
//!
//! Nodes and pieces live in slot arenas (`Vec<Option<T>>` with a free list)
//! addressed by stable [`NodeId`] / [`PieceId`] handles.  Nodes and pieces
//! reference each other exclusively through handles, so the node ↔ piece
//! cycle never turns into an ownership cycle, and freed slots are recycled
//! by later insertions.  A handle to a freed slot is stale; lookups with it
//! return `None`.
//!
//! # Edge direction convention
//!
//! The direction stored with an edge is the piece's tangent at that node
//! pointing *away* from the node: the heading a train standing there takes
//! to enter the piece.  A piece's two entries mirror each other along the
//! piece (exactly opposite for straights).  Duplicate rejection compares
//! these outward headings, since two pieces enterable along the same heading
//! would be indistinguishable to a driver.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps positions to nearby nodes.  The placement
//! gateway uses it to snap free endpoints onto existing junctions within the
//! configured merge radius.
//!
//! # Concurrency
//!
//! Mutation stays on the owning game-logic thread.  Concurrent readers
//! either clone a snapshot after the last completed mutation (the store is
//! plain data, `Clone` is a deep copy) or share the store behind a
//! reader-writer lock; nothing in here blocks or suspends mid-mutation.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rail_core::{Direction, GeometryConfig, NodeId, PieceId, Vec2};

use crate::{NetError, NetResult, TrackPiece};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D point with the associated
/// `NodeId`.  `PartialEq` lets the tree remove exactly this entry even when
/// two junctions share coordinates.
#[derive(Clone, PartialEq)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in metres².
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Edges and nodes ───────────────────────────────────────────────────────────

/// One registered connection at a junction node.
#[derive(Copy, Clone, Debug)]
pub struct RailEdge {
    /// Node at the piece's other end.
    pub neighbor: NodeId,
    /// Tangent heading away from this node into the piece.
    pub direction: Direction,
    /// Piece this edge belongs to.
    pub piece: PieceId,
}

/// A junction point where track pieces meet.
#[derive(Clone, Debug)]
pub struct NetworkNode {
    pub position: Vec2,
    pub(crate) edges: Vec<RailEdge>,
}

impl NetworkNode {
    fn new(position: Vec2) -> Self {
        Self { position, edges: Vec::new() }
    }

    /// Incident edges in registration order.
    #[inline]
    pub fn edges(&self) -> &[RailEdge] {
        &self.edges
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Edge whose outward heading is within `epsilon` radians of `heading`,
    /// if any.
    pub fn edge_towards(&self, heading: Direction, epsilon: f64) -> Option<&RailEdge> {
        self.edges.iter().find(|e| e.direction.approx_eq(heading, epsilon))
    }
}

// ── RailNetwork ───────────────────────────────────────────────────────────────

/// The mutable graph of junction nodes and track pieces.
///
/// Constructed empty; all growth goes through the placement gateway
/// (`place` / `remove` in the gateway module), which composes the edge
/// primitives below into all-or-nothing operations.
#[derive(Clone)]
pub struct RailNetwork {
    pub(crate) config: GeometryConfig,
    nodes: Vec<Option<NetworkNode>>,
    free_nodes: Vec<NodeId>,
    pieces: Vec<Option<TrackPiece>>,
    free_pieces: Vec<PieceId>,
    spatial: RTree<NodeEntry>,
}

impl RailNetwork {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            free_nodes: Vec::new(),
            pieces: Vec::new(),
            free_pieces: Vec::new(),
            spatial: RTree::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of live nodes (freed slots excluded).
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    /// Number of live pieces (freed slots excluded).
    pub fn piece_count(&self) -> usize {
        self.pieces.len() - self.free_pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Total centreline length of all live pieces, in metres.
    pub fn total_length(&self) -> f64 {
        self.pieces().map(|(_, p)| p.length()).sum()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&NetworkNode> {
        self.nodes.get(id.index()).and_then(|slot| slot.as_ref())
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&TrackPiece> {
        self.pieces.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Live nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NetworkNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    /// Live pieces in ascending id order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &TrackPiece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PieceId(i as u32), p)))
    }

    /// Incident edges at `node` in registration order.  Stale handles report
    /// none.
    #[inline]
    pub fn edges(&self, node: NodeId) -> &[RailEdge] {
        self.node(node).map_or(&[], NetworkNode::edges)
    }

    /// Edge count at `node`.  Stale handles report 0.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, NetworkNode::degree)
    }

    /// True for nodes where a driving decision exists: dead ends, junctions
    /// of three or more pieces, or anything other than a plain pass-through
    /// of degree 2.
    #[inline]
    pub fn is_critical(&self, node: NodeId) -> bool {
        self.degree(node) != 2
    }

    /// Nearest node within the configured merge radius of `pos`, if any.
    pub fn node_near(&self, pos: Vec2) -> Option<NodeId> {
        self.snap(pos).map(|(id, _)| id)
    }

    /// Nearest node within the merge radius, with its exact position.
    pub(crate) fn snap(&self, pos: Vec2) -> Option<(NodeId, Vec2)> {
        let entry = self.spatial.nearest_neighbor(&[pos.x, pos.y])?;
        let entry_pos = Vec2::new(entry.point[0], entry.point[1]);
        (entry_pos.distance(pos) <= self.config.merge_radius).then_some((entry.id, entry_pos))
    }

    // ── Edge primitives ───────────────────────────────────────────────────

    /// Register an edge at `node` heading outward along `direction`.
    ///
    /// Rejects headings within `angle_epsilon` of an existing edge at the
    /// node, leaving the node untouched.  A piece's two edges must always be
    /// registered (and removed) together; the placement gateway is the only
    /// caller that does so with rollback on partial failure.
    pub fn add_edge(
        &mut self,
        node: NodeId,
        direction: Direction,
        neighbor: NodeId,
        piece: PieceId,
    ) -> NetResult<()> {
        let epsilon = self.config.angle_epsilon;
        let n = self.node_mut(node).ok_or(NetError::NodeNotFound(node))?;
        if n.edges.iter().any(|e| e.direction.approx_eq(direction, epsilon)) {
            return Err(NetError::DuplicateDirection { node, heading: direction });
        }
        n.edges.push(RailEdge { neighbor, direction, piece });
        Ok(())
    }

    /// Remove the edge at `node` that references `piece`.
    ///
    /// A missing node or edge here means the graph already violates the
    /// reciprocity invariant: the violation is logged and reported as
    /// [`NetError::InconsistentNetwork`].
    pub fn remove_edge(&mut self, node: NodeId, piece: PieceId) -> NetResult<()> {
        if self.node(node).is_none() {
            return Err(self.violation(node, format!("edge removal for {piece} at a vanished node")));
        }
        let removed = self
            .node_mut(node)
            .map(|n| {
                let before = n.edges.len();
                n.edges.retain(|e| e.piece != piece);
                before != n.edges.len()
            })
            .unwrap_or(false);
        if removed {
            Ok(())
        } else {
            Err(self.violation(node, format!("no edge references {piece}")))
        }
    }

    // ── Arena internals (composed by the placement gateway) ───────────────

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut NetworkNode> {
        self.nodes.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut TrackPiece> {
        self.pieces.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    /// Allocate a node slot (recycling freed ones) and index its position.
    pub(crate) fn insert_node(&mut self, position: Vec2) -> NodeId {
        let id = match self.free_nodes.pop() {
            Some(id) => {
                self.nodes[id.index()] = Some(NetworkNode::new(position));
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Some(NetworkNode::new(position)));
                id
            }
        };
        self.spatial.insert(NodeEntry { point: [position.x, position.y], id });
        id
    }

    /// Free a node slot and drop it from the spatial index.  Only legal for
    /// edgeless nodes.
    pub(crate) fn discard_node(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.index()).and_then(Option::take) {
            debug_assert!(node.edges.is_empty(), "discarding a node that still has edges");
            self.spatial.remove(&NodeEntry {
                point: [node.position.x, node.position.y],
                id,
            });
            self.free_nodes.push(id);
        }
    }

    /// Allocate a piece slot (recycling freed ones).
    pub(crate) fn insert_piece(&mut self, piece: TrackPiece) -> PieceId {
        match self.free_pieces.pop() {
            Some(id) => {
                self.pieces[id.index()] = Some(piece);
                id
            }
            None => {
                let id = PieceId(self.pieces.len() as u32);
                self.pieces.push(Some(piece));
                id
            }
        }
    }

    /// Free a piece slot, returning the piece if it was live.
    pub(crate) fn take_piece(&mut self, id: PieceId) -> Option<TrackPiece> {
        let piece = self.pieces.get_mut(id.index()).and_then(Option::take);
        if piece.is_some() {
            self.free_pieces.push(id);
        }
        piece
    }

    /// Log and build an [`NetError::InconsistentNetwork`].  Reaching this is
    /// a bug in a mutation path, never a user-facing placement failure.
    pub(crate) fn violation(&self, node: NodeId, detail: String) -> NetError {
        tracing::error!("network invariant violated at {node}: {detail}");
        NetError::InconsistentNetwork { node, detail }
    }
}

impl Default for RailNetwork {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}
