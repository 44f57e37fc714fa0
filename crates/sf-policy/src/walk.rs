//! Random-walk policies.

use sf_core::{AgentId, SimRng};

use crate::{CostDescent, MovementPolicy, PolicyContext, Step};

/// Step to a uniformly random free neighbor; stay when boxed in.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomWalk;

impl MovementPolicy for RandomWalk {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step {
        let Some(here) = ctx.grid.position(agent) else {
            return Step::Stay;
        };
        let options = ctx.grid.valid_neighbors(here);
        rng.choose(&options).copied().into()
    }
}

/// With probability `bias` follow [`CostDescent`], otherwise take a
/// [`RandomWalk`] step.
///
/// `bias = 1.0` is plain descent; `bias = 0.0` is a pure random walk.  Small
/// amounts of noise shake agents off plateaus where descent alone stalls.
#[derive(Copy, Clone, Debug)]
pub struct BiasedWalk {
    bias:    f64,
    descent: CostDescent,
}

impl BiasedWalk {
    /// # Panics
    /// Panics if `bias` is outside `[0, 1]` or NaN.
    pub fn new(bias: f64) -> Self {
        assert!((0.0..=1.0).contains(&bias), "bias must be within [0, 1], got {bias}");
        Self { bias, descent: CostDescent::default() }
    }

    /// Replace the descent used on biased steps.
    pub fn with_descent(mut self, descent: CostDescent) -> Self {
        self.descent = descent;
        self
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn descent(&self) -> CostDescent {
        self.descent
    }
}

impl MovementPolicy for BiasedWalk {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step {
        if rng.gen_bool(self.bias) {
            self.descent.step(agent, ctx, rng)
        } else {
            RandomWalk.step(agent, ctx, rng)
        }
    }
}
