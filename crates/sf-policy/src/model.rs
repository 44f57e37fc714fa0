//! The `MovementPolicy` trait, the extension point for user code.

use sf_core::{AgentId, SimRng};

use crate::{PolicyContext, Step};

/// Pluggable per-agent movement rule.
///
/// Implement this to change how agents move.  Every call receives a
/// read-only [`PolicyContext`] and the simulation's [`SimRng`]; drawing all
/// randomness from that RNG keeps runs reproducible for a fixed seed.
///
/// # Example
///
/// ```rust
/// use sf_core::{AgentId, SimRng};
/// use sf_policy::{MovementPolicy, PolicyContext, Step};
///
/// /// Always tries to step to the first free neighbor.
/// struct FirstFree;
///
/// impl MovementPolicy for FirstFree {
///     fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, _rng: &mut SimRng) -> Step {
///         ctx.grid
///             .position(agent)
///             .and_then(|here| ctx.grid.valid_neighbors(here).first().copied())
///             .into()
///     }
/// }
/// ```
pub trait MovementPolicy {
    /// Decide where `agent` goes this tick.
    ///
    /// Returning [`Step::Stay`] is always valid.  The returned destination is
    /// re-validated on commit, so a policy may propose a cell that another
    /// agent takes first.
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step;
}

impl<P: MovementPolicy + ?Sized> MovementPolicy for Box<P> {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step {
        (**self).step(agent, ctx, rng)
    }
}
