//! Strongly typed agent identifier.
//!
//! Agent ids are handed out by the grid starting at 1 and never reused, so an
//! id doubles as the agent's creation order.  `AgentId` is `Copy + Ord + Hash`
//! so it can key maps and sort without ceremony.

use std::fmt;

/// Identifier of one agent.  Always positive once assigned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// The first id a fresh grid assigns.
    pub const FIRST: AgentId = AgentId(1);

    /// The id assigned right after this one.
    #[inline]
    pub fn next(self) -> AgentId {
        AgentId(self.0 + 1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
