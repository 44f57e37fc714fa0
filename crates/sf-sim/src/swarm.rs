//! The `Swarm` struct and its tick loop.

use sf_core::{AgentId, Cell, SimRng, SwarmConfig, Tick};
use sf_field::{CostField, FieldView};
use sf_grid::Grid;
use sf_policy::{MovementPolicy, PolicyContext, Step};
use tracing::{debug, info};

use crate::{AgentView, SimResult, Snapshot, SwarmObserver, TickReport};

/// The main simulation runner.
///
/// `Swarm<A, S>` owns the grid, the cost field, the RNG, and two policies:
/// `A` for active agents and `S` for agents that were settled when the tick
/// began.  Each [`tick`](Self::tick):
///
/// 1. Snapshots every agent's `reached` flag and shuffles the agents with the
///    simulation RNG.
/// 2. For each agent in that order: refreshes the cost field if the previous
///    move dirtied it, asks the matching policy for a [`Step`], and commits it
///    through [`Grid::move_agent`].  Later agents see earlier moves.
/// 3. Checks grid consistency (debug builds) and advances the clock.
///
/// Create via [`SwarmBuilder`][crate::SwarmBuilder].
pub struct Swarm<A: MovementPolicy, S: MovementPolicy> {
    /// The configuration the swarm was built from.
    pub config: SwarmConfig,

    grid:    Grid,
    field:   CostField,
    rng:     SimRng,
    tick:    Tick,
    active:  A,
    settled: S,

    /// Convergence state at the end of the previous tick.
    was_converged: bool,
}

impl<A: MovementPolicy, S: MovementPolicy> Swarm<A, S> {
    pub(crate) fn from_parts(config: SwarmConfig, grid: Grid, rng: SimRng, active: A, settled: S) -> Self {
        Self {
            config,
            grid,
            field: CostField::new(),
            rng,
            tick: Tick::ZERO,
            active,
            settled,
            was_converged: false,
        }
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance every agent by at most one decision.
    pub fn tick<O: SwarmObserver>(&mut self, observer: &mut O) -> TickReport {
        let now = self.tick;
        observer.on_tick_start(now);

        let mut order: Vec<(AgentId, bool)> =
            self.grid.agents().map(|(id, slot)| (id, slot.reached)).collect();
        self.rng.shuffle(&mut order);

        let mut report = TickReport::new(now);
        for (agent, was_settled) in order {
            let Some(here) = self.grid.position(agent) else {
                continue;
            };

            let step = {
                let ctx = PolicyContext::new(now, &self.grid, self.field.view(&self.grid));
                if was_settled {
                    self.settled.step(agent, &ctx, &mut self.rng)
                } else {
                    self.active.step(agent, &ctx, &mut self.rng)
                }
            };

            match step {
                Step::MoveTo(dest) if dest != here => {
                    if self.grid.move_agent(agent, dest) {
                        report.moved += 1;
                    } else {
                        report.blocked += 1;
                    }
                }
                _ => report.stayed += 1,
            }

            match (was_settled, self.grid.reached(agent).unwrap_or(false)) {
                (false, true) => report.settled += 1,
                (true, false) => report.regressed += 1,
                _ => {}
            }
        }

        debug_assert!(self.grid.is_consistent(), "grid invariants broken at {now}");

        report.reached_total = self.grid.agents().filter(|(_, s)| s.reached).count();
        self.tick.advance();

        debug!(
            tick = %now,
            moved = report.moved,
            stayed = report.stayed,
            blocked = report.blocked,
            reached = report.reached_total,
            "tick complete"
        );
        observer.on_tick_end(&report);

        let converged = self.grid.converged();
        if converged && !self.was_converged {
            info!(tick = %now, agents = self.grid.agent_count(), "converged");
            observer.on_converged(now);
        }
        self.was_converged = converged;

        report
    }

    /// Run exactly `n` ticks.  Returns the report of the last one, if any.
    pub fn run_ticks<O: SwarmObserver>(&mut self, n: u64, observer: &mut O) -> Option<TickReport> {
        let mut last = None;
        for _ in 0..n {
            last = Some(self.tick(observer));
        }
        last
    }

    /// Tick until [`converged`](Self::converged) or `max_ticks` have run.
    ///
    /// Returns the number of ticks it took, or `None` if the budget ran out
    /// first.  An already converged swarm returns `Some(0)` without ticking.
    pub fn run_until_converged<O: SwarmObserver>(&mut self, max_ticks: u64, observer: &mut O) -> Option<u64> {
        for elapsed in 0..=max_ticks {
            if self.converged() {
                return Some(elapsed);
            }
            if elapsed < max_ticks {
                self.tick(observer);
            }
        }
        None
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` once every agent is settled on a goal cell.
    #[inline]
    pub fn converged(&self) -> bool {
        self.grid.converged()
    }

    /// The next tick to be processed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_policy(&self) -> &A {
        &self.active
    }

    pub fn settled_policy(&self) -> &S {
        &self.settled
    }

    /// Current cost of `cell`; `None` if unreachable or off-grid.
    pub fn cost_at(&mut self, cell: Cell) -> Option<u32> {
        self.field.cost_at(&self.grid, cell)
    }

    /// The whole cost field, refreshed.
    pub fn cost_field(&mut self) -> FieldView<'_> {
        self.field.view(&self.grid)
    }

    /// Owned copy of the current state for a renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick:      self.tick,
            height:    self.grid.height(),
            width:     self.grid.width(),
            agents:    self
                .grid
                .agents()
                .map(|(id, slot)| AgentView { id, cell: slot.cell, reached: slot.reached })
                .collect(),
            goal:      self.grid.goal_cells().to_vec(),
            claimed:   self.grid.claimed_cells(),
            obstacles: self.grid.obstacles(),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place agents at explicit cells.  Atomic; see [`Grid::add_agents`].
    pub fn add_agents(&mut self, cells: &[Cell]) -> SimResult<Vec<AgentId>> {
        Ok(self.grid.add_agents(cells)?)
    }

    /// Place `n` agents on random free cells using the simulation RNG and the
    /// configured attempt budget.
    pub fn add_agents_random(&mut self, n: usize) -> SimResult<Vec<AgentId>> {
        Ok(self.grid.add_agents_random(n, self.config.placement_attempts, &mut self.rng)?)
    }

    /// Remove an agent.  Unknown ids are an error.
    pub fn remove_agent(&mut self, agent: AgentId) -> SimResult<Cell> {
        Ok(self.grid.remove_agent(agent)?)
    }

    pub fn add_obstacles(&mut self, cells: &[Cell]) -> SimResult<()> {
        Ok(self.grid.add_obstacles(cells)?)
    }

    pub fn set_goal(&mut self, cells: &[Cell]) -> SimResult<()> {
        Ok(self.grid.set_goal(cells)?)
    }

    /// Shift the goal shape by `(dy, dx)` and report the outcome to
    /// `observer`.  A rejected shift leaves the goal where it was.
    pub fn translate_goal<O: SwarmObserver>(&mut self, dy: i32, dx: i32, observer: &mut O) -> SimResult<()> {
        let result = self.grid.translate_goal(dy, dx);
        observer.on_goal_moved(dy, dx, result.is_ok());
        Ok(result?)
    }
}
