//! Density balancing for settled agents.
//!
//! The goal shape is cut into subregions of `subregion_size` consecutive goal
//! cells.  Each settled agent looks at the live loads, finds the least-dense
//! subregion (lowest `settled / capacity`, first index on ties), and proposes a
//! uniformly random cell in it.
//!
//! An agent only leaves its own subregion if, after the move, its source would
//! still be at least as dense as the target.  Without that guard two
//! subregions one agent apart trade that agent back and forth forever.
//! Agents standing outside the goal (possible with sticky `reached`) have no
//! source and always try to relocate.

use sf_core::{AgentId, SimRng};
use sf_grid::Grid;

use crate::{MovementPolicy, PolicyContext, Step};

/// Settled agents in one subregion against its size.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SubregionLoad {
    pub settled:  usize,
    pub capacity: usize,
}

impl SubregionLoad {
    pub fn density(self) -> f64 {
        self.settled as f64 / self.capacity as f64
    }

    /// Exact `self.density() < other.density()` without floating point.
    #[inline]
    pub fn less_dense_than(self, other: SubregionLoad) -> bool {
        self.settled * other.capacity < other.settled * self.capacity
    }
}

/// The default settled-agent policy.
#[derive(Copy, Clone, Debug)]
pub struct DensityBalance {
    subregion_size: usize,
}

impl Default for DensityBalance {
    fn default() -> Self {
        Self { subregion_size: 4 }
    }
}

impl DensityBalance {
    /// # Panics
    /// Panics if `subregion_size == 0`.
    pub fn new(subregion_size: usize) -> Self {
        assert!(subregion_size > 0, "subregion_size must be positive");
        Self { subregion_size }
    }

    /// Goal cells per subregion.  Always positive.
    #[inline]
    pub fn subregion_size(&self) -> usize {
        self.subregion_size
    }

    /// Current load of every subregion, in goal order.
    pub fn loads(&self, grid: &Grid) -> Vec<SubregionLoad> {
        grid.goal()
            .subregions(self.subregion_size)
            .map(|cells| SubregionLoad {
                settled:  cells.iter().filter(|&&c| grid.settled_at(c)).count(),
                capacity: cells.len(),
            })
            .collect()
    }

    /// Index of the least-dense subregion; the first one on ties.
    pub fn least_dense(loads: &[SubregionLoad]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, load) in loads.iter().enumerate() {
            match best {
                Some(b) if !load.less_dense_than(loads[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl MovementPolicy for DensityBalance {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> Step {
        let grid = ctx.grid;
        let Some(here) = grid.position(agent) else {
            return Step::Stay;
        };

        let loads = self.loads(grid);
        let Some(target) = Self::least_dense(&loads) else {
            return Step::Stay;
        };

        if let Some(home) = grid.goal().subregion_of(here, self.subregion_size) {
            if home == target {
                return Step::Stay;
            }
            let after_src = SubregionLoad {
                settled: loads[home].settled.saturating_sub(1),
                ..loads[home]
            };
            let after_dst = SubregionLoad {
                settled: loads[target].settled + 1,
                ..loads[target]
            };
            if after_src.less_dense_than(after_dst) {
                return Step::Stay;
            }
        }

        rng.choose(grid.goal().subregion(target, self.subregion_size))
            .copied()
            .into()
    }
}
