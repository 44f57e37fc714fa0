//! Top-level simulation configuration.

use crate::{CoreError, CoreResult, Topology};

// ── ReachedMode ───────────────────────────────────────────────────────────────

/// How an agent's `reached` flag evolves when it moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReachedMode {
    /// Once an agent has reached the goal it stays settled, even if it is later
    /// moved (or the goal is moved) so that it no longer stands on a goal cell.
    Sticky,
    /// `reached` is recomputed from goal membership after every move and every
    /// goal relocation, so settled agents can regress to active.
    #[default]
    Live,
}

// ── SwarmConfig ───────────────────────────────────────────────────────────────

/// Simulation configuration.
///
/// Typically built in code by the driver, or loaded from a TOML/JSON file with
/// the `serde` feature and passed to `SwarmBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmConfig {
    /// Grid rows.  Must be positive.
    pub height: u32,

    /// Grid columns.  Must be positive.
    pub width: u32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Edge behavior for neighbor enumeration and cost-field expansion.
    pub topology: Topology,

    /// Sticky or live `reached` semantics.
    pub reached_mode: ReachedMode,

    /// Number of consecutive goal cells per density-balancing subregion.
    pub subregion_size: usize,

    /// Rejection-sampling budget for random agent placement.
    pub placement_attempts: u32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            height:             15,
            width:              15,
            seed:               0,
            topology:           Topology::Torus,
            reached_mode:       ReachedMode::Live,
            subregion_size:     4,
            placement_attempts: 10_000,
        }
    }
}

impl SwarmConfig {
    /// Config for an `height × width` grid with every other field defaulted.
    pub fn with_size(height: u32, width: u32) -> Self {
        Self { height, width, ..Self::default() }
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(CoreError::InvalidDimensions {
                height: self.height,
                width:  self.width,
            });
        }
        if self.subregion_size == 0 {
            return Err(CoreError::Config("subregion_size must be positive".into()));
        }
        Ok(())
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.height as usize * self.width as usize
    }
}
