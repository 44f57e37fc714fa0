//! The policy that never moves.

use sf_core::{AgentId, SimRng};

use crate::{MovementPolicy, PolicyContext, Step};

/// Never moves.  Use as the settled policy to freeze agents once they land.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hold;

impl MovementPolicy for Hold {
    #[inline]
    fn step(&self, _agent: AgentId, _ctx: &PolicyContext<'_>, _rng: &mut SimRng) -> Step {
        Step::Stay
    }
}
