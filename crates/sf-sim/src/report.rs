//! Per-tick counters and owned state snapshots for renderers.

use sf_core::{AgentId, Cell, Tick};

/// What happened during one tick.
///
/// `moved + stayed + blocked` equals the number of agents processed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// The tick that was processed.
    pub tick: Tick,

    /// Agents whose move was committed.
    pub moved: usize,

    /// Agents whose policy chose to stay.
    pub stayed: usize,

    /// Agents whose proposed destination was taken or walled.
    pub blocked: usize,

    /// Agents that went from active to settled this tick.
    pub settled: usize,

    /// Agents that went from settled to active this tick.
    pub regressed: usize,

    /// Settled agents after the tick.
    pub reached_total: usize,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// Agents processed this tick.
    #[inline]
    pub fn processed(&self) -> usize {
        self.moved + self.stayed + self.blocked
    }
}

/// One agent as seen by a renderer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:      AgentId,
    pub cell:    Cell,
    pub reached: bool,
}

/// Owned copy of everything a renderer needs for one frame.
///
/// Taking a snapshot never affects the simulation; the snapshot does not
/// borrow from the swarm.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:      Tick,
    pub height:    u32,
    pub width:     u32,
    /// Ascending `AgentId` order.
    pub agents:    Vec<AgentView>,
    /// Goal order.
    pub goal:      Vec<Cell>,
    pub claimed:   Vec<Cell>,
    pub obstacles: Vec<Cell>,
}

impl Snapshot {
    /// Settled agents in this frame.
    pub fn reached_count(&self) -> usize {
        self.agents.iter().filter(|a| a.reached).count()
    }
}
