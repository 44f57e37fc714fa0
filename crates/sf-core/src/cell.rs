//! Grid coordinates, orthogonal directions, and edge topology.
//!
//! A [`Cell`] is a plain `(row, col)` value key.  It carries no knowledge of
//! the grid it belongs to; every operation that needs the grid's dimensions
//! takes them as arguments so the type stays `Copy` and hashable.

use std::fmt;

// ── Topology ──────────────────────────────────────────────────────────────────

/// How the grid treats its edges when enumerating neighbors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Coordinates wrap modulo `(height, width)`.
    #[default]
    Torus,
    /// Neighbors that fall outside the grid do not exist.
    Bounded,
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four orthogonal moves.
///
/// [`Direction::ALL`] fixes the enumeration order used everywhere neighbors
/// are listed: up, down, left, right.  Tie-breaking in cost-field descent
/// depends on this order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)` for one step in this direction.
    #[inline]
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up    => (-1, 0),
            Direction::Down  => (1, 0),
            Direction::Left  => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A grid coordinate.  `0 <= row < height`, `0 <= col < width` for any cell
/// the grid hands out.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Row-major index into a `height * width` buffer.
    #[inline(always)]
    pub fn index(self, width: u32) -> usize {
        self.row as usize * width as usize + self.col as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn from_index(index: usize, width: u32) -> Self {
        let w = width as usize;
        Self::new((index / w) as u32, (index % w) as u32)
    }

    /// `true` if the cell lies inside a `height × width` grid.
    #[inline]
    pub fn in_bounds(self, height: u32, width: u32) -> bool {
        self.row < height && self.col < width
    }

    /// Coordinates shifted by `(dy, dx)` without any bounds handling.
    ///
    /// Returned as signed values so callers can detect cells that left the
    /// grid.
    #[inline]
    pub fn shifted(self, dy: i64, dx: i64) -> (i64, i64) {
        (self.row as i64 + dy, self.col as i64 + dx)
    }

    /// The neighbor one step in `dir`, or `None` if it does not exist under
    /// `topology`.
    pub fn neighbor(self, dir: Direction, height: u32, width: u32, topology: Topology) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let (r, c) = self.shifted(dr, dc);
        match topology {
            Topology::Torus => Some(Cell::new(
                r.rem_euclid(height as i64) as u32,
                c.rem_euclid(width as i64) as u32,
            )),
            Topology::Bounded => {
                if r < 0 || c < 0 || r >= height as i64 || c >= width as i64 {
                    None
                } else {
                    Some(Cell::new(r as u32, c as u32))
                }
            }
        }
    }

    /// Which single step turns `self` into `to`, if any.
    ///
    /// Returns the first matching direction in [`Direction::ALL`] order, so on
    /// degenerate tori (height or width of 1 or 2) the answer is stable.
    pub fn direction_to(self, to: Cell, height: u32, width: u32, topology: Topology) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d, height, width, topology) == Some(to))
    }
}

impl From<(u32, u32)> for Cell {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
