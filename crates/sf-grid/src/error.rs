//! Grid error type.

use thiserror::Error;

use sf_core::{AgentId, Cell};

/// Errors produced by `sf-grid` mutations.
///
/// Every failing operation is atomic: when one of these is returned the grid
/// is exactly as it was before the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: u32, width: u32 },

    #[error("cell {0} is already occupied or requested twice")]
    CellOccupied(Cell),

    #[error("only found {placed} of {requested} free cells after {attempts} attempts")]
    InsufficientSpace {
        requested: usize,
        placed:    usize,
        attempts:  u32,
    },

    /// Off the grid.  Goal translation also reports border cells this way.
    #[error("cell ({row}, {col}) is out of bounds")]
    OutOfBounds { row: i64, col: i64 },

    #[error("cell {0} is blocked by an obstacle")]
    Obstructed(Cell),

    #[error("cell {0} belongs to the goal shape")]
    GoalConflict(Cell),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),
}

impl GridError {
    pub(crate) fn out_of_bounds(row: i64, col: i64) -> Self {
        GridError::OutOfBounds { row, col }
    }
}

pub type GridResult<T> = Result<T, GridError>;
