//! Greedy descent over the cost field.  Default policy for active agents.

use sf_core::{AgentId, Cell, SimRng};
use sf_field::UNREACHABLE;

use crate::{MovementPolicy, PolicyContext, Step};

/// How [`CostDescent`] picks among neighbors that share the lowest cost.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TieBreak {
    /// The first one in [`Direction::ALL`][sf_core::Direction::ALL] order
    /// (up, down, left, right).  Uses no randomness.
    #[default]
    FirstInOrder,
    /// A uniform draw from the simulation RNG.
    Random,
}

/// Step to the free neighbor with the lowest cost, if it beats staying.
///
/// The comparison is strict: an agent only moves when some free, reachable
/// neighbor costs less than its current cell.  Otherwise (local plateau,
/// boxed in, or nothing reachable) it stays.
#[derive(Copy, Clone, Debug, Default)]
pub struct CostDescent {
    pub tie_break: TieBreak,
}

impl CostDescent {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// The neighbor of `here` this policy would move to, or `None` to stay.
    pub fn best_neighbor(&self, here: Cell, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Option<Cell> {
        let mut best_cost = ctx.field.raw(here);
        let mut best: Vec<Cell> = Vec::with_capacity(4);

        for n in ctx.grid.valid_neighbors(here) {
            let cost = ctx.field.raw(n);
            if cost == UNREACHABLE {
                continue;
            }
            if cost < best_cost {
                best_cost = cost;
                best.clear();
                best.push(n);
            } else if cost == best_cost && !best.is_empty() {
                best.push(n);
            }
        }

        match self.tie_break {
            TieBreak::FirstInOrder => best.first().copied(),
            TieBreak::Random => rng.choose(&best).copied(),
        }
    }
}

impl MovementPolicy for CostDescent {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step {
        match ctx.grid.position(agent) {
            Some(here) => self.best_neighbor(here, ctx, rng).into(),
            None => Step::Stay,
        }
    }
}
