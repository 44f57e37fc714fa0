//! `sf-sim` — tick loop orchestrator for the rust_sf framework.
//!
//! # Tick loop
//!
//! ```text
//! tick():
//!   ① Snapshot   — record (AgentId, reached) for every agent, then shuffle
//!                  the list with the swarm's SimRng.
//!   ② Decide     — for each agent in that order: refresh the cost field if
//!                  stale, build a PolicyContext, call
//!                    settled policy  if the agent was reached at ①
//!                    active policy   otherwise
//!   ③ Commit     — Step::MoveTo(c) → Grid::move_agent (blocked = no-op)
//!   ④ Finish     — debug-assert grid consistency, advance the clock, report
//!                  to the observer, fire on_converged on the rising edge.
//! ```
//!
//! Decide and commit alternate per agent, so every decision sees the moves
//! committed before it in the same tick.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` for `Snapshot` and `TickReport`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sf_core::{Cell, SwarmConfig};
//! use sf_sim::{NoopObserver, SwarmBuilder};
//!
//! let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(3, 3))
//!     .goal([Cell::new(1, 1)])
//!     .agents([Cell::new(0, 0)])
//!     .build()?;
//! swarm.run_until_converged(10, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod swarm;

#[cfg(test)]
mod tests;

pub use builder::SwarmBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SwarmObserver, TracingObserver};
pub use report::{AgentView, Snapshot, TickReport};
pub use swarm::Swarm;
