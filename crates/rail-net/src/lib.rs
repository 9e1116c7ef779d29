//! `rail-net` — the rail network graph and placement layer of `railkit`.
//!
//! Owns the mutable world state: junction nodes, the track pieces between
//! them, and the spatial index used for endpoint snapping.  All growth and
//! demolition goes through the placement gateway, which validates before it
//! mutates so the graph invariants hold between any two operations.
//!
//! # What lives here
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`store`] | `RailNetwork` arenas, `NetworkNode`, `RailEdge`, snapping  |
//! | [`piece`] | `TrackPiece`, `RailNode` endpoint anchors                  |
//! | [`place`] | `Endpoint` requests, atomic `place` / `remove`             |
//! | [`check`] | component consistency checker, deterministic `dump`        |
//! | [`error`] | `NetError`, `NetResult`                                    |
//!
//! # Concurrency
//!
//! `RailNetwork` is single-writer: `place` and `remove` belong on the
//! game-logic thread.  Renderers and planners either clone a snapshot after
//! the last completed operation or share the store behind a reader-writer
//! lock.  Mutation never suspends midway, so readers under either scheme
//! only ever observe fully consistent states.

pub mod check;
pub mod error;
pub mod piece;
pub mod place;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NetError, NetResult};
pub use piece::{RailNode, TrackPiece};
pub use place::Endpoint;
pub use store::{NetworkNode, RailEdge, RailNetwork};
