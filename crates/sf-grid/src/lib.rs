//! `sf-grid` — occupancy grid, agent bookkeeping, and goal shape.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`occupancy`] | `Occupant` (empty / agent / obstacle), `AgentSlot`         |
//! | [`goal`]      | `GoalShape`: ordered goal cells, translation, subregions   |
//! | [`grid`]      | `Grid`: the agent ↔ cell bijection and its mutation API    |
//! | [`error`]     | `GridError`, `GridResult<T>`                               |
//!
//! # Revision counter
//!
//! Every mutation that changes the set of *unclaimed* goal cells, or the set
//! of passable cells, bumps [`Grid::revision`].  Derived structures (the cost
//! field in `sf-field`) remember the revision they were computed at and treat
//! any mismatch as "dirty".

pub mod error;
pub mod goal;
pub mod grid;
pub mod occupancy;


pub use error::{GridError, GridResult};
pub use goal::GoalShape;
pub use grid::Grid;
pub use occupancy::{AgentSlot, Occupant};
