//! Multi-source breadth-first cost field.
//!
//! # Algorithm
//!
//! Every unclaimed goal cell is a source at cost 0.  Expansion is a plain FIFO
//! breadth-first search over the grid's topology with unit edge weights, which
//! yields the same distances as Dijkstra with uniform costs.  Discovery order
//! never changes a distance, so the field is fully determined by the grid.
//!
//! | Cell kind                | Cost                        | Expanded through? |
//! |--------------------------|-----------------------------|-------------------|
//! | unclaimed goal cell      | 0 (source)                  | yes               |
//! | claimed goal cell        | 0 (terminal)                | no                |
//! | wall                     | [`UNREACHABLE`]             | no                |
//! | anything else            | steps to nearest source     | yes               |
//!
//! Agents that are still moving do not block the field; they are transient and
//! the per-tick neighbor filter already keeps agents from stepping onto them.

use std::collections::VecDeque;

use tracing::trace;

use sf_core::Cell;
use sf_grid::{Grid, Occupant};

/// Sentinel cost for cells no source can reach.
pub const UNREACHABLE: u32 = u32::MAX;

/// Owner of the cost buffer.  Read it through [`view`](Self::view).
#[derive(Clone, Debug, Default)]
pub struct CostField {
    height: u32,
    width:  u32,

    /// Row-major costs, `height * width` entries.
    costs: Vec<u32>,

    /// Grid revision the buffer was computed at.  `None` until the first
    /// computation or after [`invalidate`](Self::invalidate).
    stamp: Option<u64>,

    /// Number of full recomputations so far.
    recomputations: u64,
}

impl CostField {
    /// An empty, dirty field.  The first [`view`](Self::view) computes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the next read must recompute.
    pub fn is_dirty(&self, grid: &Grid) -> bool {
        self.stamp != Some(grid.revision()) || (self.height, self.width) != grid.size()
    }

    /// Force the next read to recompute regardless of the grid revision.
    pub fn invalidate(&mut self) {
        self.stamp = None;
    }

    /// Recompute if dirty.  Returns `true` if a recomputation happened.
    pub fn refresh(&mut self, grid: &Grid) -> bool {
        if !self.is_dirty(grid) {
            return false;
        }
        self.recompute(grid);
        true
    }

    /// A read handle over up-to-date costs.
    pub fn view(&mut self, grid: &Grid) -> FieldView<'_> {
        self.refresh(grid);
        FieldView { field: self }
    }

    /// Cost of `cell` after refreshing; `None` if unreachable or off-grid.
    pub fn cost_at(&mut self, grid: &Grid, cell: Cell) -> Option<u32> {
        self.view(grid).cost(cell)
    }

    /// Full recomputation from scratch.
    pub fn recompute(&mut self, grid: &Grid) {
        let (height, width) = grid.size();
        self.height = height;
        self.width = width;
        self.costs.clear();
        self.costs.resize(height as usize * width as usize, UNREACHABLE);

        let mut queue: VecDeque<Cell> = VecDeque::new();
        for &cell in grid.goal_cells() {
            self.costs[cell.index(width)] = 0;
            if !grid.is_claimed(cell) {
                queue.push_back(cell);
            }
        }
        let sources = queue.len();

        while let Some(cell) = queue.pop_front() {
            let next = self.costs[cell.index(width)] + 1;
            for n in grid.neighbors(cell) {
                let i = n.index(width);
                if self.costs[i] != UNREACHABLE {
                    continue;
                }
                if grid.occupant(n) == Some(Occupant::Obstacle) {
                    continue;
                }
                self.costs[i] = next;
                queue.push_back(n);
            }
        }

        self.stamp = Some(grid.revision());
        self.recomputations += 1;
        trace!(
            revision = grid.revision(),
            sources,
            reachable = self.costs.iter().filter(|&&c| c != UNREACHABLE).count(),
            "cost field recomputed"
        );
    }

    /// How many times the field has been rebuilt.
    #[inline]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

// ── FieldView ─────────────────────────────────────────────────────────────────

/// Borrowed, guaranteed-fresh view of a [`CostField`].
#[derive(Copy, Clone, Debug)]
pub struct FieldView<'a> {
    field: &'a CostField,
}

impl FieldView<'_> {
    /// Steps from `cell` to the nearest unclaimed goal cell.
    ///
    /// `None` for unreachable or off-grid cells.
    #[inline]
    pub fn cost(&self, cell: Cell) -> Option<u32> {
        match self.raw(cell) {
            UNREACHABLE => None,
            c => Some(c),
        }
    }

    /// Like [`cost`](Self::cost) but returns [`UNREACHABLE`] instead of `None`.
    #[inline]
    pub fn raw(&self, cell: Cell) -> u32 {
        if !cell.in_bounds(self.field.height, self.field.width) {
            return UNREACHABLE;
        }
        self.field.costs[cell.index(self.field.width)]
    }

    /// Row-major cost buffer.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.field.costs
    }

    /// Number of cells with a finite cost.
    pub fn reachable_count(&self) -> usize {
        self.field.costs.iter().filter(|&&c| c != UNREACHABLE).count()
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.field.height, self.field.width)
    }
}
