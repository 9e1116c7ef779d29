//! Network-layer error type.

use thiserror::Error;

use rail_core::{Direction, NodeId, PieceId};
use rail_geom::GeomError;

/// Errors produced by `rail-net`.
///
/// The first four variants are ordinary placement feedback.
/// [`InconsistentNetwork`](NetError::InconsistentNetwork) is different: it
/// reports a broken structural invariant, which means a bug in a mutation
/// path, and is also logged at `error` level when raised.
#[derive(Debug, Error)]
pub enum NetError {
    /// Placement would register two edges at one node whose headings are
    /// within the angular tolerance of each other.  A train stopped at the
    /// node could not tell the two pieces apart.
    #[error("a track already leaves {node} within tolerance of heading {heading}")]
    DuplicateDirection { node: NodeId, heading: Direction },

    #[error("{0} not found in the network")]
    NodeNotFound(NodeId),

    #[error("{0} not found in the network")]
    PieceNotFound(PieceId),

    #[error("geometry rejected: {0}")]
    Geometry(#[from] GeomError),

    #[error("inconsistent network at {node}: {detail}")]
    InconsistentNetwork { node: NodeId, detail: String },
}

pub type NetResult<T> = Result<T, NetError>;
