//! The occupancy grid: owner of every agent's position.
//!
//! # Data layout
//!
//! Occupancy is a dense row-major `Vec<Occupant>` of `height * width` cells;
//! the inverse map is a `BTreeMap<AgentId, AgentSlot>`.  The two are kept
//! mutually consistent by every method on this type: a cell holds
//! `Occupant::Agent(id)` iff `agents[id].cell` is that cell.
//!
//! The `BTreeMap` gives ascending-id iteration, which the tick loop relies on
//! as the deterministic base order it shuffles from.
//!
//! # Claims
//!
//! A goal cell is *claimed* when the agent standing on it has
//! `reached == true`.  Claims are derived from occupancy on demand and never
//! stored separately, so `claimed ⊆ goal` holds by construction.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use sf_core::{AgentId, Cell, Direction, ReachedMode, SimRng, SwarmConfig, Topology};

use crate::{AgentSlot, GoalShape, GridError, GridResult, Occupant};

/// Occupancy grid plus the goal shape it is scored against.
///
/// All mutation goes through methods on this type.  Collaborators that only
/// need to look (renderers, policies) borrow it immutably.
#[derive(Clone, Debug)]
pub struct Grid {
    height:       u32,
    width:        u32,
    topology:     Topology,
    reached_mode: ReachedMode,

    /// Row-major occupancy, `height * width` entries.
    cells: Vec<Occupant>,

    /// Inverse of `cells` for agent entries.
    agents: BTreeMap<AgentId, AgentSlot>,

    goal: GoalShape,

    /// Next id to hand out.  Ids are never reused.
    next_id: AgentId,

    /// Bumped whenever the unclaimed goal set or passability changes.
    revision: u64,
}

impl Grid {
    /// An empty `height × width` torus with live `reached` semantics.
    pub fn new(height: u32, width: u32) -> GridResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            topology:     Topology::default(),
            reached_mode: ReachedMode::default(),
            cells:        vec![Occupant::Empty; height as usize * width as usize],
            agents:       BTreeMap::new(),
            goal:         GoalShape::default(),
            next_id:      AgentId::FIRST,
            revision:     0,
        })
    }

    /// An empty grid sized and configured from `config`.
    pub fn from_config(config: &SwarmConfig) -> GridResult<Self> {
        Ok(Self::new(config.height, config.width)?
            .with_topology(config.topology)
            .with_reached_mode(config.reached_mode))
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self.touch();
        self
    }

    /// Switch `reached` semantics.  Existing flags are re-evaluated under the
    /// new mode.
    pub fn with_reached_mode(mut self, mode: ReachedMode) -> Self {
        self.reached_mode = mode;
        self.reevaluate_reached();
        self
    }

    // ── Dimensions & configuration ────────────────────────────────────────

    /// `(height, width)`.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn reached_mode(&self) -> ReachedMode {
        self.reached_mode
    }

    /// Monotonic counter of changes to the unclaimed goal set or to
    /// passability.  Equal revisions mean any field derived from the grid is
    /// still valid.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width)
    }

    // ── Agent queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// All live agent ids in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    /// `(id, slot)` for every live agent in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, AgentSlot)> + '_ {
        self.agents.iter().map(|(&id, &slot)| (id, slot))
    }

    #[inline]
    pub fn slot(&self, agent: AgentId) -> Option<AgentSlot> {
        self.agents.get(&agent).copied()
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Cell> {
        self.slot(agent).map(|s| s.cell)
    }

    #[inline]
    pub fn reached(&self, agent: AgentId) -> Option<bool> {
        self.slot(agent).map(|s| s.reached)
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    /// What stands on `cell`; `None` if it is outside the grid.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<Occupant> {
        if self.in_bounds(cell) {
            Some(self.cells[cell.index(self.width)])
        } else {
            None
        }
    }

    /// `true` if `cell` is inside the grid and empty.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.occupant(cell) == Some(Occupant::Empty)
    }

    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.occupant(cell) == Some(Occupant::Obstacle)
    }

    /// Every obstacle cell in row-major order.
    pub fn obstacles(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == Occupant::Obstacle)
            .map(|(i, _)| Cell::from_index(i, self.width))
            .collect()
    }

    /// Number of cells that are neither walls nor agents.
    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|o| o.is_empty()).count()
    }

    /// The four orthogonal neighbors of `cell` under this grid's topology,
    /// in [`Direction::ALL`] order, regardless of occupancy.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| cell.neighbor(d, self.height, self.width, self.topology))
    }

    /// Neighbors of `cell` an agent could step onto right now.
    ///
    /// Order follows [`Direction::ALL`]; duplicates that appear on tori one or
    /// two cells wide are dropped, keeping the first.
    pub fn valid_neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut out: Vec<Cell> = Vec::with_capacity(4);
        for n in self.neighbors(cell) {
            if n != cell && self.is_free(n) && !out.contains(&n) {
                out.push(n);
            }
        }
        out
    }

    /// All cells on the outer border, row-major.  Useful for walling the arena
    /// with [`add_obstacles`](Self::add_obstacles).
    pub fn boundary_cells(&self) -> Vec<Cell> {
        (0..self.height)
            .flat_map(|r| (0..self.width).map(move |c| Cell::new(r, c)))
            .filter(|c| c.row == 0 || c.col == 0 || c.row == self.height - 1 || c.col == self.width - 1)
            .collect()
    }

    // ── Goal queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn goal(&self) -> &GoalShape {
        &self.goal
    }

    #[inline]
    pub fn goal_cells(&self) -> &[Cell] {
        self.goal.cells()
    }

    /// `true` if `cell` is a goal cell held by a settled agent.
    pub fn is_claimed(&self, cell: Cell) -> bool {
        if !self.goal.contains(cell) {
            return false;
        }
        self.settled_at(cell)
    }

    /// `true` if a settled agent stands on `cell`, goal or not.
    pub fn settled_at(&self, cell: Cell) -> bool {
        match self.occupant(cell).and_then(Occupant::agent) {
            Some(id) => self.agents.get(&id).is_some_and(|s| s.reached),
            None => false,
        }
    }

    /// Goal cells held by settled agents, in goal order.
    pub fn claimed_cells(&self) -> Vec<Cell> {
        self.goal.cells().iter().copied().filter(|&c| self.is_claimed(c)).collect()
    }

    /// Goal cells still open, in goal order.
    pub fn unclaimed_cells(&self) -> Vec<Cell> {
        self.goal.cells().iter().copied().filter(|&c| !self.is_claimed(c)).collect()
    }

    /// `true` once every agent is settled on a goal cell.
    ///
    /// Vacuously `true` for an empty population.
    pub fn converged(&self) -> bool {
        self.agents
            .values()
            .all(|s| s.reached && self.goal.contains(s.cell))
    }

    // ── Agent mutation ────────────────────────────────────────────────────

    /// Place one new agent on each of `positions`, in order.
    ///
    /// The whole batch is validated first (in bounds, not an obstacle, not
    /// occupied, no cell listed twice); on any conflict nothing changes.
    /// Agents placed on goal cells start settled.
    pub fn add_agents(&mut self, positions: &[Cell]) -> GridResult<Vec<AgentId>> {
        let mut seen: FxHashSet<Cell> = FxHashSet::default();
        for &cell in positions {
            self.check_free(cell)?;
            if !seen.insert(cell) {
                return Err(GridError::CellOccupied(cell));
            }
        }

        let mut ids = Vec::with_capacity(positions.len());
        let mut claimed_any = false;
        for &cell in positions {
            let id = self.next_id;
            self.next_id = id.next();

            let reached = self.goal.contains(cell);
            claimed_any |= reached;
            self.cells[cell.index(self.width)] = Occupant::Agent(id);
            self.agents.insert(id, AgentSlot { cell, reached });
            ids.push(id);
        }
        if claimed_any {
            self.touch();
        }
        debug!(count = ids.len(), total = self.agents.len(), "placed agents");
        Ok(ids)
    }

    /// Place `n` agents on distinct free cells drawn uniformly at random.
    ///
    /// Each draw is one attempt; after `max_attempts` draws without collecting
    /// `n` cells this fails with [`GridError::InsufficientSpace`] and nothing
    /// is placed.
    pub fn add_agents_random(
        &mut self,
        n:            usize,
        max_attempts: u32,
        rng:          &mut SimRng,
    ) -> GridResult<Vec<AgentId>> {
        if n > self.free_cell_count() {
            return Err(GridError::InsufficientSpace {
                requested: n,
                placed:    0,
                attempts:  0,
            });
        }

        let mut picked: FxHashSet<Cell> = FxHashSet::default();
        let mut order: Vec<Cell> = Vec::with_capacity(n);
        let mut attempts = 0u32;
        while order.len() < n {
            if attempts == max_attempts {
                return Err(GridError::InsufficientSpace {
                    requested: n,
                    placed:    order.len(),
                    attempts,
                });
            }
            attempts += 1;
            let cell = Cell::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            if self.is_free(cell) && picked.insert(cell) {
                order.push(cell);
            }
        }
        self.add_agents(&order)
    }

    /// Move `agent` to `dest`.
    ///
    /// Returns `false` and changes nothing if the agent is unknown, `dest` is
    /// outside the grid, or `dest` holds a wall or another agent.  Moving onto
    /// the agent's own cell is a successful no-op.  Adjacency is not checked;
    /// policies decide how far an agent may go.
    ///
    /// On success the `reached` flag follows the grid's [`ReachedMode`].
    pub fn move_agent(&mut self, agent: AgentId, dest: Cell) -> bool {
        let Some(slot) = self.agents.get(&agent).copied() else {
            return false;
        };
        if slot.cell == dest {
            return true;
        }
        if !self.is_free(dest) {
            return false;
        }

        let was_claim = slot.reached && self.goal.contains(slot.cell);
        let on_goal = self.goal.contains(dest);
        let reached = match self.reached_mode {
            ReachedMode::Sticky => slot.reached || on_goal,
            ReachedMode::Live => on_goal,
        };

        self.cells[slot.cell.index(self.width)] = Occupant::Empty;
        self.cells[dest.index(self.width)] = Occupant::Agent(agent);
        self.agents.insert(agent, AgentSlot { cell: dest, reached });

        if was_claim || (reached && on_goal) {
            self.touch();
        }
        true
    }

    /// Remove `agent`, freeing its cell.  Returns the cell it stood on.
    ///
    /// Unknown ids are an error, never a silent no-op.
    pub fn remove_agent(&mut self, agent: AgentId) -> GridResult<Cell> {
        let slot = self.agents.remove(&agent).ok_or(GridError::AgentNotFound(agent))?;
        self.cells[slot.cell.index(self.width)] = Occupant::Empty;
        if slot.reached && self.goal.contains(slot.cell) {
            self.touch();
        }
        debug!(%agent, cell = %slot.cell, "removed agent");
        Ok(slot.cell)
    }

    // ── Goal mutation ─────────────────────────────────────────────────────

    /// Replace the goal shape.
    ///
    /// Every cell must be inside the grid and not a wall.  Agents already
    /// standing on goal cells are re-evaluated under the current
    /// [`ReachedMode`].
    pub fn set_goal(&mut self, cells: &[Cell]) -> GridResult<()> {
        for &cell in cells {
            if !self.in_bounds(cell) {
                return Err(GridError::out_of_bounds(cell.row as i64, cell.col as i64));
            }
            if self.is_obstacle(cell) {
                return Err(GridError::Obstructed(cell));
            }
        }
        self.goal = GoalShape::new(cells.iter().copied());
        self.reevaluate_reached();
        self.touch();
        debug!(cells = self.goal.len(), "goal shape set");
        Ok(())
    }

    /// Shift the goal shape rigidly by `(dy, dx)`.
    ///
    /// Rejected as a whole, leaving the shape untouched, if any cell would
    /// leave the grid or land on its outer border ([`GridError::OutOfBounds`]),
    /// or land on a wall ([`GridError::Obstructed`]).  A zero offset changes nothing, not even
    /// the revision.
    pub fn translate_goal(&mut self, dy: i32, dx: i32) -> GridResult<()> {
        if dy == 0 && dx == 0 {
            return Ok(());
        }
        let moved = match self.goal.translated(dy, dx, self.height, self.width) {
            Ok(shape) => shape,
            Err(e) => {
                warn!(dy, dx, error = %e, "goal translation rejected");
                return Err(e);
            }
        };
        if let Some(&wall) = moved.cells().iter().find(|&&c| self.is_obstacle(c)) {
            warn!(dy, dx, cell = %wall, "goal translation rejected");
            return Err(GridError::Obstructed(wall));
        }

        self.goal = moved;
        self.reevaluate_reached();
        self.touch();
        info!(dy, dx, "goal shape translated");
        Ok(())
    }

    // ── Obstacles ─────────────────────────────────────────────────────────

    /// Wall off `cells`.
    ///
    /// Atomic: every cell must be inside the grid, hold no agent, and not be a
    /// goal cell.  Cells that are already walls are accepted.
    pub fn add_obstacles(&mut self, cells: &[Cell]) -> GridResult<()> {
        for &cell in cells {
            match self.occupant(cell) {
                None => return Err(GridError::out_of_bounds(cell.row as i64, cell.col as i64)),
                Some(Occupant::Agent(_)) => return Err(GridError::CellOccupied(cell)),
                Some(_) => {}
            }
            if self.goal.contains(cell) {
                return Err(GridError::GoalConflict(cell));
            }
        }
        for &cell in cells {
            self.cells[cell.index(self.width)] = Occupant::Obstacle;
        }
        self.touch();
        Ok(())
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// `true` if occupancy and the agent map are exact inverses and every goal
    /// cell is a valid, unwalled cell.
    pub fn is_consistent(&self) -> bool {
        if self.cells.len() != self.height as usize * self.width as usize {
            return false;
        }
        let placed = self.cells.iter().filter(|o| o.agent().is_some()).count();
        if placed != self.agents.len() {
            return false;
        }
        let slots_ok = self.agents.iter().all(|(&id, slot)| {
            id < self.next_id
                && self.in_bounds(slot.cell)
                && self.cells[slot.cell.index(self.width)] == Occupant::Agent(id)
        });
        let goal_ok = self
            .goal
            .cells()
            .iter()
            .all(|&c| self.in_bounds(c) && !self.is_obstacle(c));
        slots_ok && goal_ok
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_free(&self, cell: Cell) -> GridResult<()> {
        match self.occupant(cell) {
            None => Err(GridError::out_of_bounds(cell.row as i64, cell.col as i64)),
            Some(Occupant::Empty) => Ok(()),
            Some(Occupant::Agent(_)) => Err(GridError::CellOccupied(cell)),
            Some(Occupant::Obstacle) => Err(GridError::Obstructed(cell)),
        }
    }

    /// Recompute every agent's `reached` flag against the current goal.
    fn reevaluate_reached(&mut self) {
        let goal = &self.goal;
        let mode = self.reached_mode;
        for slot in self.agents.values_mut() {
            let on_goal = goal.contains(slot.cell);
            slot.reached = match mode {
                ReachedMode::Sticky => slot.reached || on_goal,
                ReachedMode::Live => on_goal,
            };
        }
    }

    #[inline]
    fn touch(&mut self) {
        self.revision += 1;
    }
}
