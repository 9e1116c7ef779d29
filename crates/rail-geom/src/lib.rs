//! `rail-geom` — tangent-constrained track shape solving for `railkit`.
//!
//! Turns endpoint constraints (positions, optionally pinned travel tangents)
//! into drivable centreline shapes: straights and circular arcs.  Everything
//! in this crate is a pure function over [`rail_core`] value types; graph
//! state and placement policy live in `rail-net`.
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`shape`]   | `TrackShape`, `StraightShape`, `ArcShape`, `Turn`        |
//! | [`solve`]   | `solve_straight`, `solve_arc`, `plan_shape`, `Endpoint`  |
//! | [`preview`] | `plan_shapes` batch fitting for drag previews            |
//! | [`error`]   | `GeomError`, `GeomResult`                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `plan_shapes` fans candidate batches out over Rayon.      |
//! | `serde`    | Adds `Serialize`/`Deserialize` to all shape types.        |

pub mod error;
pub mod preview;
pub mod shape;
pub mod solve;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GeomError, GeomResult};
pub use preview::plan_shapes;
pub use shape::{ArcShape, StraightShape, TrackShape, Turn};
pub use solve::{Endpoint, plan_shape, solve_arc, solve_straight};
