//! `sf-core` — foundational types for the `rust_sf` shape-formation framework.
//!
//! This crate is a dependency of every other `sf-*` crate.  It has no `sf-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                              |
//! | [`cell`]   | `Cell`, `Direction`, `Topology`                        |
//! | [`time`]   | `Tick`                                                 |
//! | [`config`] | `SwarmConfig`, `ReachedMode`                           |
//! | [`rng`]    | `SimRng` (seeded, single-threaded)                     |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Direction, Topology};
pub use config::{ReachedMode, SwarmConfig};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::Tick;
