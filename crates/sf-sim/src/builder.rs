//! Fluent builder for constructing a [`Swarm`].

use sf_core::{Cell, SimRng, SwarmConfig};
use sf_grid::Grid;
use sf_policy::{CostDescent, DensityBalance, MovementPolicy};
use tracing::debug;

use crate::{SimResult, Swarm};

/// Fluent builder for [`Swarm<A, S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                      |
/// |------------------------|----------------------------------------------|
/// | `.goal(v)`             | empty goal shape                             |
/// | `.obstacles(v)`        | no walls                                     |
/// | `.boundary_walls()`    | off                                          |
/// | `.agents(v)`           | no explicitly placed agents                  |
/// | `.random_agents(n)`    | `0`                                          |
/// | `.active_policy(p)`    | `CostDescent::default()`                     |
/// | `.settled_policy(p)`   | `DensityBalance` with `config.subregion_size`|
///
/// `build` applies them in the order walls, goal, explicit agents, random
/// agents, so agents can never be placed on a wall.
///
/// # Example
///
/// ```rust,ignore
/// let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(15, 15))
///     .boundary_walls()
///     .goal(letter_cells)
///     .random_agents(40)
///     .build()?;
/// swarm.run_until_converged(500, &mut NoopObserver);
/// ```
pub struct SwarmBuilder<A: MovementPolicy = CostDescent, S: MovementPolicy = DensityBalance> {
    config:         SwarmConfig,
    goal:           Vec<Cell>,
    obstacles:      Vec<Cell>,
    boundary_walls: bool,
    agents:         Vec<Cell>,
    random_agents:  usize,
    active:         A,
    settled:        S,
}

impl SwarmBuilder {
    /// Create a builder with the default policies.
    pub fn new(config: SwarmConfig) -> Self {
        // A zero size is reported by `build()` through `SwarmConfig::validate`.
        let settled = DensityBalance::new(config.subregion_size.max(1));
        Self {
            config,
            goal:           Vec::new(),
            obstacles:      Vec::new(),
            boundary_walls: false,
            agents:         Vec::new(),
            random_agents:  0,
            active:         CostDescent::default(),
            settled,
        }
    }
}

impl<A: MovementPolicy, S: MovementPolicy> SwarmBuilder<A, S> {
    pub fn goal(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.goal = cells.into_iter().collect();
        self
    }

    pub fn obstacles(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.obstacles.extend(cells);
        self
    }

    /// Wall off every border cell of the grid.
    pub fn boundary_walls(mut self) -> Self {
        self.boundary_walls = true;
        self
    }

    /// Place agents at these cells, in order.
    pub fn agents(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.agents.extend(cells);
        self
    }

    /// Additionally place `n` agents on random free cells.
    pub fn random_agents(mut self, n: usize) -> Self {
        self.random_agents = n;
        self
    }

    /// Replace the policy for active agents.
    pub fn active_policy<P: MovementPolicy>(self, policy: P) -> SwarmBuilder<P, S> {
        SwarmBuilder {
            config:         self.config,
            goal:           self.goal,
            obstacles:      self.obstacles,
            boundary_walls: self.boundary_walls,
            agents:         self.agents,
            random_agents:  self.random_agents,
            active:         policy,
            settled:        self.settled,
        }
    }

    /// Replace the policy for settled agents.
    pub fn settled_policy<P: MovementPolicy>(self, policy: P) -> SwarmBuilder<A, P> {
        SwarmBuilder {
            config:         self.config,
            goal:           self.goal,
            obstacles:      self.obstacles,
            boundary_walls: self.boundary_walls,
            agents:         self.agents,
            random_agents:  self.random_agents,
            active:         self.active,
            settled:        policy,
        }
    }

    /// Validate the configuration, lay out the grid, place agents, and return
    /// a ready-to-run [`Swarm`].
    pub fn build(self) -> SimResult<Swarm<A, S>> {
        self.config.validate()?;

        let mut grid = Grid::from_config(&self.config)?;
        let mut rng = SimRng::new(self.config.seed);

        let mut walls = self.obstacles;
        if self.boundary_walls {
            walls.extend(grid.boundary_cells());
        }
        if !walls.is_empty() {
            grid.add_obstacles(&walls)?;
        }
        if !self.goal.is_empty() {
            grid.set_goal(&self.goal)?;
        }
        if !self.agents.is_empty() {
            grid.add_agents(&self.agents)?;
        }
        if self.random_agents > 0 {
            grid.add_agents_random(self.random_agents, self.config.placement_attempts, &mut rng)?;
        }

        debug!(
            height = self.config.height,
            width = self.config.width,
            agents = grid.agent_count(),
            goal = grid.goal().len(),
            "swarm built"
        );

        Ok(Swarm::from_parts(self.config, grid, rng, self.active, self.settled))
    }
}
