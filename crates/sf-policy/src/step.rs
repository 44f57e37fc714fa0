//! The decision a policy returns for one agent and one tick.

use sf_core::Cell;

/// What an agent wants to do this tick.
///
/// A `MoveTo` is a request, not a guarantee: the simulation commits it through
/// `Grid::move_agent`, which turns a blocked destination into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Remain on the current cell.
    Stay,

    /// Move to `Cell`.  Usually an orthogonal neighbor; settled-agent
    /// rebalancing may name any goal cell.
    MoveTo(Cell),
}

impl Step {
    /// The requested destination, if any.
    #[inline]
    pub fn destination(self) -> Option<Cell> {
        match self {
            Step::Stay => None,
            Step::MoveTo(c) => Some(c),
        }
    }
}

impl From<Option<Cell>> for Step {
    fn from(dest: Option<Cell>) -> Self {
        dest.map_or(Step::Stay, Step::MoveTo)
    }
}
