//! letters — agents spell a word inside a walled 15×15 arena.
//!
//! The goal shape is three letters drawn with 24 cells.  Fifteen agents start
//! on random free cells, descend the cost field, and spread across the shape.
//! Once they converge the word shifts down and the swarm re-forms it.
//!
//! Usage: `cargo run -p letters -- [seed]`.  Set `RUST_LOG=debug` for
//! per-tick logs.

mod render;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sf_core::{Cell, SwarmConfig, Topology};
use sf_policy::MovementPolicy;
use sf_sim::{Swarm, SwarmBuilder, TracingObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const HEIGHT:      u32 = 15;
const WIDTH:       u32 = 15;
const AGENT_COUNT: usize = 15;
const DEFAULT_SEED: u64 = 42;
const MAX_TICKS:   u64 = 400;
const FRAME_DELAY: Duration = Duration::from_millis(120);

/// Second phase: slide the word this far down.
const SHIFT: (i32, i32) = (5, 0);

#[rustfmt::skip]
const WORD: [(u32, u32); 24] = [
    (3, 2), (4, 2), (5, 2), (2, 3), (6, 3), (2, 4), (6, 4),
    (3, 6), (4, 6), (5, 6), (6, 6), (2, 7), (5, 7), (3, 8), (4, 8), (5, 8), (6, 8),
    (3, 10), (6, 10), (2, 11), (4, 11), (6, 11), (2, 12), (5, 12),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("seed must be an integer, got {arg:?}"))?,
        None => DEFAULT_SEED,
    };

    let config = SwarmConfig {
        seed,
        topology: Topology::Bounded,
        ..SwarmConfig::with_size(HEIGHT, WIDTH)
    };
    let mut swarm = SwarmBuilder::new(config)
        .boundary_walls()
        .goal(WORD.iter().map(|&(r, c)| Cell::new(r, c)))
        .random_agents(AGENT_COUNT)
        .build()
        .context("building the arena")?;

    info!(seed, agents = AGENT_COUNT, goal = WORD.len(), "starting");
    let mut observer = TracingObserver::every(25);

    form(&mut swarm, &mut observer, "spelling")?;

    swarm
        .translate_goal(SHIFT.0, SHIFT.1, &mut observer)
        .context("shifting the word")?;
    form(&mut swarm, &mut observer, "re-forming")?;

    Ok(())
}

/// Tick and draw until converged.
fn form<A, S>(swarm: &mut Swarm<A, S>, observer: &mut TracingObserver, phase: &str) -> Result<()>
where
    A: MovementPolicy,
    S: MovementPolicy,
{
    let start = swarm.current_tick();
    print!("{}", render::frame(&swarm.snapshot()));

    while !swarm.converged() {
        if swarm.current_tick().since(start) >= MAX_TICKS {
            bail!("{phase}: not converged after {MAX_TICKS} ticks");
        }
        swarm.tick(observer);
        print!("\x1b[{}A{}", HEIGHT + 1, render::frame(&swarm.snapshot()));
        thread::sleep(FRAME_DELAY);
    }

    info!(phase, ticks = swarm.current_tick().since(start), "shape formed");
    Ok(())
}
