//! `sf-policy` — how an agent decides its next step.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`step`]    | `Step` (`Stay`, `MoveTo`)                                      |
//! | [`context`] | `PolicyContext<'a>`: read-only grid + fresh cost field         |
//! | [`model`]   | `MovementPolicy` trait                                         |
//! | [`descent`] | `CostDescent`: greedy cost-field descent, `TieBreak`           |
//! | [`balance`] | `DensityBalance`: settled-agent rebalancing, `SubregionLoad`   |
//! | [`walk`]    | `RandomWalk`, `BiasedWalk`                                     |
//! | [`hold`]    | `Hold`: never moves                                            |
//!
//! # Design notes
//!
//! `sf-sim` runs each agent through two phases:
//!
//! 1. **Decide**: call `MovementPolicy::step` with a `&PolicyContext`.  The
//!    policy only reads; it cannot touch the grid.
//! 2. **Commit**: the simulation applies the returned `Step` through
//!    `Grid::move_agent`, which re-validates occupancy.
//!
//! Which policy an agent gets depends on its state at the start of the tick:
//! active agents use the swarm's active policy (default `CostDescent`),
//! settled agents the settled policy (default `DensityBalance`).

pub mod balance;
pub mod context;
pub mod descent;
pub mod hold;
pub mod model;
pub mod step;
pub mod walk;


pub use balance::{DensityBalance, SubregionLoad};
pub use context::PolicyContext;
pub use descent::{CostDescent, TieBreak};
pub use hold::Hold;
pub use model::MovementPolicy;
pub use step::Step;
pub use walk::{BiasedWalk, RandomWalk};
