//! Per-cell occupancy and per-agent bookkeeping records.

use sf_core::{AgentId, Cell};

/// What stands on one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    #[default]
    Empty,
    Agent(AgentId),
    /// Permanent wall.  Never moves, never holds an agent or a goal cell.
    Obstacle,
}

impl Occupant {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// The agent standing here, if any.
    #[inline]
    pub fn agent(self) -> Option<AgentId> {
        match self {
            Occupant::Agent(id) => Some(id),
            _ => None,
        }
    }
}

/// Where an agent stands and whether it currently counts as settled.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSlot {
    pub cell:    Cell,
    pub reached: bool,
}
