//! Swarm observer trait for progress reporting and data collection.

use sf_core::Tick;
use tracing::{info, warn};

use crate::TickReport;

/// Callbacks invoked by [`Swarm`][crate::Swarm] at key points.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SwarmObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.tick.0 % self.interval == 0 {
///             println!("tick {}: {} settled", report.tick, report.reached_total);
///         }
///     }
/// }
/// ```
pub trait SwarmObserver {
    /// Called at the very start of each tick, before any agent moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been processed.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called at the end of the first tick on which the swarm is converged.
    ///
    /// Fires again if the swarm later loses and regains convergence (e.g.
    /// after the goal moves).
    fn on_converged(&mut self, _tick: Tick) {}

    /// Called after every goal translation request.
    ///
    /// `accepted` is `false` when the translation was rejected and the goal
    /// did not move.
    fn on_goal_moved(&mut self, _dy: i32, _dx: i32, _accepted: bool) {}
}

/// A [`SwarmObserver`] that does nothing.
pub struct NoopObserver;

impl SwarmObserver for NoopObserver {}

/// Forwards observer events to `tracing` at `info` level.
///
/// Tick summaries are emitted every `interval` ticks (`0` disables them);
/// convergence and goal moves are always reported.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    pub interval: u64,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self { interval: 10 }
    }
}

impl TracingObserver {
    pub fn every(interval: u64) -> Self {
        Self { interval }
    }
}

impl SwarmObserver for TracingObserver {
    fn on_tick_end(&mut self, report: &TickReport) {
        if self.interval > 0 && report.tick.0.is_multiple_of(self.interval) {
            info!(
                tick = %report.tick,
                moved = report.moved,
                blocked = report.blocked,
                reached = report.reached_total,
                "swarm progress"
            );
        }
    }

    fn on_converged(&mut self, tick: Tick) {
        info!(%tick, "swarm converged");
    }

    fn on_goal_moved(&mut self, dy: i32, dx: i32, accepted: bool) {
        if accepted {
            info!(dy, dx, "goal moved");
        } else {
            warn!(dy, dx, "goal move rejected");
        }
    }
}
