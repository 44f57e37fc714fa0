//! The goal shape: the ordered set of cells the population must fill.
//!
//! Order matters only for density balancing: subregions are runs of
//! `subregion_size` consecutive cells in insertion order, so a caller that
//! lists a letter stroke by stroke gets stroke-shaped subregions.

use rustc_hash::FxHashMap;

use sf_core::Cell;

use crate::{GridError, GridResult};

/// Ordered, duplicate-free set of goal cells with O(1) membership.
#[derive(Clone, Debug, Default)]
pub struct GoalShape {
    cells: Vec<Cell>,
    /// `cell → position in cells`.
    index: FxHashMap<Cell, usize>,
}

impl GoalShape {
    /// Build a shape from `cells`, keeping the first occurrence of duplicates.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut shape = Self::default();
        for cell in cells {
            if !shape.index.contains_key(&cell) {
                shape.index.insert(cell, shape.cells.len());
                shape.cells.push(cell);
            }
        }
        shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Goal cells in insertion order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Position of `cell` in insertion order.
    #[inline]
    pub fn position(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    /// The whole shape shifted by `(dy, dx)`.
    ///
    /// Fails with [`GridError::OutOfBounds`] naming the first cell that would
    /// leave a `height × width` grid or land on its outer border (row 0,
    /// column 0, row `height - 1`, column `width - 1`); `self` is never
    /// modified.
    pub fn translated(&self, dy: i32, dx: i32, height: u32, width: u32) -> GridResult<GoalShape> {
        let (last_row, last_col) = (height as i64 - 1, width as i64 - 1);
        let mut moved = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let (r, c) = cell.shifted(dy as i64, dx as i64);
            if r <= 0 || c <= 0 || r >= last_row || c >= last_col {
                return Err(GridError::out_of_bounds(r, c));
            }
            moved.push(Cell::new(r as u32, c as u32));
        }
        // A rigid shift keeps cells distinct, so indices carry over unchanged.
        Ok(GoalShape::new(moved))
    }

    // ── Subregions ────────────────────────────────────────────────────────

    /// Consecutive runs of `size` goal cells; the last run may be shorter.
    ///
    /// # Panics
    /// Panics if `size == 0`.
    pub fn subregions(&self, size: usize) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(size)
    }

    /// Number of subregions for the given `size`.
    pub fn subregion_count(&self, size: usize) -> usize {
        self.cells.len().div_ceil(size)
    }

    /// Index of the subregion holding `cell`, if it is a goal cell.
    #[inline]
    pub fn subregion_of(&self, cell: Cell, size: usize) -> Option<usize> {
        self.position(cell).map(|i| i / size)
    }

    /// Cells of subregion `index`; empty if out of range.
    pub fn subregion(&self, index: usize, size: usize) -> &[Cell] {
        let start = (index * size).min(self.cells.len());
        let end = (start + size).min(self.cells.len());
        &self.cells[start..end]
    }
}

impl PartialEq for GoalShape {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for GoalShape {}
