//! `rail-core` — foundational types for the `railkit` track framework.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and almost no external ones: `thiserror` for
//! the fallible conversions, plus optional `serde`.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `PieceId`, `TrackTypeId`                      |
//! | [`vec2`]      | `Vec2` planar vector math                               |
//! | [`direction`] | `Direction` unit tangent, `wrap_angle`                  |
//! | [`config`]    | `GeometryConfig` tolerances                             |
//! | [`catalog`]   | `TrackType`, `TrackCatalog`, generator dispatch         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.     |

pub mod catalog;
pub mod config;
pub mod direction;
pub mod ids;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use catalog::{GeneratorKind, ShapeKind, TrackCatalog, TrackStyle, TrackType};
pub use config::GeometryConfig;
pub use direction::{DegenerateDirection, Direction, wrap_angle};
pub use ids::{NodeId, PieceId, TrackTypeId};
pub use vec2::Vec2;
