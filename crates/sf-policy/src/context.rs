//! Read-only simulation state passed to every policy call.

use sf_core::Tick;
use sf_field::FieldView;
use sf_grid::Grid;

/// A read-only view of the simulation handed to
/// [`MovementPolicy::step`][crate::MovementPolicy::step].
///
/// `sf-sim` builds one per agent decision, right after refreshing the cost
/// field, so `field` always reflects every move committed earlier in the same
/// tick.
///
/// # Lifetimes
///
/// Both borrows end before the decision is committed; the simulation never
/// holds a `PolicyContext` while mutating the grid.
#[derive(Clone, Copy)]
pub struct PolicyContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Occupancy, agents, walls, and goal shape.
    pub grid: &'a Grid,

    /// Up-to-date cost-to-nearest-unclaimed-goal.
    pub field: FieldView<'a>,
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(tick: Tick, grid: &'a Grid, field: FieldView<'a>) -> Self {
        Self { tick, grid, field }
    }
}
