//! Integration tests for sf-sim.

use sf_core::{AgentId, Cell, ReachedMode, SimRng, SwarmConfig, Topology};
use sf_policy::{MovementPolicy, PolicyContext, Step};

use crate::{SwarmObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(row: u32, col: u32) -> Cell {
    Cell::new(row, col)
}

fn bounded(height: u32, width: u32) -> SwarmConfig {
    SwarmConfig { topology: Topology::Bounded, ..SwarmConfig::with_size(height, width) }
}

/// Two rows of four goal cells: subregion 0 is row `top`, subregion 1 the row below.
fn two_rows(top: u32, left: u32) -> Vec<Cell> {
    (0..2).flat_map(|r| (0..4).map(move |k| c(top + r, left + k))).collect()
}

/// Every agent tries to step one column to the right.
struct StepRight;

impl MovementPolicy for StepRight {
    fn step(&self, agent: AgentId, ctx: &PolicyContext<'_>, _rng: &mut SimRng) -> Step {
        ctx.grid.position(agent).map(|p| c(p.row, p.col + 1)).into()
    }
}

#[derive(Default)]
struct Recorder {
    starts:     u64,
    reports:    Vec<TickReport>,
    converged:  Vec<u64>,
    goal_moves: Vec<(i32, i32, bool)>,
}

impl SwarmObserver for Recorder {
    fn on_tick_start(&mut self, _tick: sf_core::Tick) {
        self.starts += 1;
    }
    fn on_tick_end(&mut self, report: &TickReport) {
        self.reports.push(*report);
    }
    fn on_converged(&mut self, tick: sf_core::Tick) {
        self.converged.push(tick.0);
    }
    fn on_goal_moved(&mut self, dy: i32, dx: i32, accepted: bool) {
        self.goal_moves.push((dy, dx, accepted));
    }
}

// ── SwarmBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use sf_grid::GridError;

    use super::*;
    use crate::{SimError, SwarmBuilder};

    #[test]
    fn builds_with_defaults() {
        let swarm = SwarmBuilder::new(SwarmConfig::default()).build().unwrap();
        assert_eq!(swarm.grid().size(), (15, 15));
        assert_eq!(swarm.grid().agent_count(), 0);
        assert_eq!(swarm.settled_policy().subregion_size(), 4);
        assert_eq!(swarm.current_tick().0, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SwarmConfig { subregion_size: 0, ..SwarmConfig::default() };
        let err = SwarmBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, SimError::Core(_)));

        let err = SwarmBuilder::new(SwarmConfig::with_size(0, 4)).build().err().unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn boundary_walls_surround_the_arena() {
        let swarm = SwarmBuilder::new(bounded(5, 6)).boundary_walls().build().unwrap();
        assert_eq!(swarm.grid().obstacles().len(), 2 * 6 + 2 * 3);
        assert!(swarm.grid().is_obstacle(c(0, 0)));
        assert!(!swarm.grid().is_obstacle(c(1, 1)));
    }

    #[test]
    fn goal_on_wall_fails() {
        let err = SwarmBuilder::new(bounded(5, 5))
            .boundary_walls()
            .goal([c(0, 2)])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Grid(GridError::Obstructed(cell)) if cell == c(0, 2)));
    }

    #[test]
    fn random_agents_avoid_walls() {
        let swarm = SwarmBuilder::new(bounded(6, 6))
            .boundary_walls()
            .random_agents(16)
            .build()
            .unwrap();
        assert_eq!(swarm.grid().agent_count(), 16);
        assert!(swarm.snapshot().agents.iter().all(|a| !swarm.grid().is_obstacle(a.cell)));
    }

    #[test]
    fn too_many_random_agents_fails() {
        let err = SwarmBuilder::new(bounded(3, 3)).random_agents(10).build().err().unwrap();
        assert!(matches!(err, SimError::Grid(GridError::InsufficientSpace { requested: 10, .. })));
    }
}

// ── Convergence ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod convergence {
    use super::*;
    use crate::{NoopObserver, SwarmBuilder};

    #[test]
    fn single_agent_reaches_single_goal() {
        let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(3, 3))
            .goal([c(1, 1)])
            .agents([c(0, 0)])
            .build()
            .unwrap();

        let ticks = swarm.run_until_converged(10, &mut NoopObserver).unwrap();
        assert!(ticks <= 10);

        let id = AgentId::FIRST;
        assert_eq!(swarm.grid().position(id), Some(c(1, 1)));
        assert_eq!(swarm.grid().reached(id), Some(true));
        assert!(swarm.grid().unclaimed_cells().is_empty());

        assert_eq!(swarm.cost_at(c(1, 1)), Some(0));
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    assert_eq!(swarm.cost_at(c(row, col)), None, "({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn already_converged_takes_zero_ticks() {
        let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(3, 3))
            .goal([c(1, 1)])
            .agents([c(1, 1)])
            .build()
            .unwrap();
        assert_eq!(swarm.run_until_converged(5, &mut NoopObserver), Some(0));
        assert_eq!(swarm.current_tick().0, 0);
    }

    #[test]
    fn unreachable_goal_exhausts_budget() {
        let mut swarm = SwarmBuilder::new(bounded(3, 3))
            .obstacles([c(0, 1), c(1, 0), c(1, 2), c(2, 1)])
            .goal([c(1, 1)])
            .agents([c(0, 0)])
            .build()
            .unwrap();
        assert_eq!(swarm.run_until_converged(20, &mut NoopObserver), None);
        assert_eq!(swarm.current_tick().0, 20);
        assert_eq!(swarm.grid().position(AgentId::FIRST), Some(c(0, 0)));
    }

    #[test]
    fn many_agents_fill_a_block() {
        let goal: Vec<Cell> = (3..6).flat_map(|r| (3..6).map(move |k| c(r, k))).collect();
        let mut swarm = SwarmBuilder::new(SwarmConfig { seed: 11, ..SwarmConfig::with_size(10, 10) })
            .goal(goal.clone())
            .random_agents(9)
            .build()
            .unwrap();

        assert!(swarm.run_until_converged(200, &mut NoopObserver).is_some());
        let snap = swarm.snapshot();
        assert!(snap.agents.iter().all(|a| goal.contains(&a.cell) && a.reached));
        assert_eq!(snap.claimed.len(), 9);
    }

    #[test]
    fn translated_goal_restabilizes() {
        let start: Vec<Cell> = vec![c(1, 1), c(1, 2), c(2, 1), c(2, 2)];
        let mut swarm = SwarmBuilder::new(bounded(8, 8))
            .goal(start.clone())
            .agents(start)
            .build()
            .unwrap();
        assert!(swarm.converged());

        let mut rec = Recorder::default();
        swarm.translate_goal(3, 3, &mut rec).unwrap();
        assert_eq!(rec.goal_moves, vec![(3, 3, true)]);
        assert!(!swarm.converged(), "live flags drop when the goal moves away");

        assert!(swarm.run_until_converged(100, &mut rec).is_some());
        let snap = swarm.snapshot();
        for a in &snap.agents {
            assert!((4..=5).contains(&a.cell.row) && (4..=5).contains(&a.cell.col), "{}", a.cell);
        }
        assert_eq!(rec.converged.len(), 1);
    }

    #[test]
    fn rejected_translation_keeps_goal() {
        let mut swarm = SwarmBuilder::new(bounded(4, 4)).goal([c(3, 3)]).build().unwrap();
        let mut rec = Recorder::default();
        assert!(swarm.translate_goal(1, 0, &mut rec).is_err());
        assert_eq!(swarm.grid().goal_cells(), &[c(3, 3)]);
        assert_eq!(rec.goal_moves, vec![(1, 0, false)]);
    }
}

// ── Density balancing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod balancing {
    use sf_policy::DensityBalance;

    use super::*;
    use crate::{NoopObserver, SwarmBuilder};

    #[test]
    fn crowded_subregion_spreads_out() {
        let goal = two_rows(2, 2);
        let mut swarm = SwarmBuilder::new(bounded(8, 8))
            .goal(goal.clone())
            .agents(goal[..4].iter().copied())
            .build()
            .unwrap();

        let policy = DensityBalance::new(4);
        let mut second = policy.loads(swarm.grid())[1].settled;
        assert_eq!(second, 0);

        for _ in 0..10 {
            swarm.tick(&mut NoopObserver);
            let loads = policy.loads(swarm.grid());
            assert!(loads[1].settled >= second, "second subregion never loses agents");
            assert!(loads.iter().all(|l| l.settled <= l.capacity));
            second = loads[1].settled;
        }

        let loads = policy.loads(swarm.grid());
        assert_eq!((loads[0].settled, loads[1].settled), (2, 2));
        assert!(swarm.converged());
    }

    #[test]
    fn balanced_shape_is_stable() {
        let goal = two_rows(0, 0);
        let mut swarm = SwarmBuilder::new(bounded(4, 4))
            .goal(goal.clone())
            .agents([goal[0], goal[1], goal[4]])
            .build()
            .unwrap();

        let before = swarm.snapshot().agents;
        let report = swarm.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(report.moved, 0);
        let after = swarm.snapshot().agents;
        assert_eq!(before, after, "loads one apart do not trade agents");
    }
}

// ── Reached semantics ─────────────────────────────────────────────────────────

#[cfg(test)]
mod reached_modes {
    use sf_policy::Hold;

    use super::*;
    use crate::SwarmBuilder;

    fn step_off(mode: ReachedMode) -> (crate::Swarm<Hold, StepRight>, TickReport) {
        let config = SwarmConfig { reached_mode: mode, ..bounded(3, 5) };
        let mut swarm = SwarmBuilder::new(config)
            .goal([c(1, 1)])
            .agents([c(1, 1)])
            .active_policy(Hold)
            .settled_policy(StepRight)
            .build()
            .unwrap();
        let report = swarm.tick(&mut crate::NoopObserver);
        (swarm, report)
    }

    #[test]
    fn live_flag_drops_off_goal() {
        let (swarm, report) = step_off(ReachedMode::Live);
        assert_eq!(swarm.grid().position(AgentId::FIRST), Some(c(1, 2)));
        assert_eq!(swarm.grid().reached(AgentId::FIRST), Some(false));
        assert_eq!((report.moved, report.regressed, report.reached_total), (1, 1, 0));
    }

    #[test]
    fn sticky_flag_survives_leaving_goal() {
        let (swarm, report) = step_off(ReachedMode::Sticky);
        assert_eq!(swarm.grid().position(AgentId::FIRST), Some(c(1, 2)));
        assert_eq!(swarm.grid().reached(AgentId::FIRST), Some(true));
        assert_eq!((report.moved, report.regressed, report.reached_total), (1, 0, 1));
        assert!(!swarm.converged(), "settled but off the goal");
    }
}

// ── Observer, snapshots, and mutation ─────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use sf_grid::GridError;

    use super::*;
    use crate::{SimError, SwarmBuilder};

    #[test]
    fn hooks_fire_once_per_tick() {
        let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(3, 3))
            .goal([c(1, 1)])
            .agents([c(0, 0)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        swarm.run_ticks(6, &mut rec);

        assert_eq!(rec.starts, 6);
        assert_eq!(rec.reports.len(), 6);
        assert!(rec.reports.iter().all(|r| r.processed() == 1));
        assert_eq!(rec.reports.iter().map(|r| r.settled).sum::<usize>(), 1);
        assert_eq!(rec.converged.len(), 1, "rising edge only");
    }

    #[test]
    fn blocked_moves_are_counted() {
        let mut swarm = SwarmBuilder::new(bounded(1, 3))
            .agents([c(0, 0), c(0, 1)])
            .active_policy(StepRight)
            .build()
            .unwrap();
        let report = swarm.tick(&mut crate::NoopObserver);
        // Whichever goes first: (0,1) moves and (0,0) follows, or (0,0) is
        // blocked and then (0,1) moves.
        assert_eq!(report.processed(), 2);
        assert!(report.moved >= 1);
        assert_eq!(report.moved + report.blocked, 2);
        assert!(swarm.grid().is_consistent());
    }

    #[test]
    fn snapshot_is_owned_and_complete() {
        let mut swarm = SwarmBuilder::new(bounded(4, 4))
            .obstacles([c(3, 3)])
            .goal([c(0, 0), c(0, 1)])
            .agents([c(0, 0), c(2, 2)])
            .build()
            .unwrap();
        let snap = swarm.snapshot();
        assert_eq!((snap.height, snap.width), (4, 4));
        assert_eq!(snap.agents.len(), 2);
        assert_eq!(snap.goal, vec![c(0, 0), c(0, 1)]);
        assert_eq!(snap.claimed, vec![c(0, 0)]);
        assert_eq!(snap.obstacles, vec![c(3, 3)]);
        assert_eq!(snap.reached_count(), 1);

        swarm.tick(&mut crate::NoopObserver);
        assert_eq!(snap.tick.0, 0, "earlier snapshot is unaffected");
    }

    #[test]
    fn removing_unknown_agent_errors() {
        let mut swarm = SwarmBuilder::new(bounded(3, 3)).agents([c(0, 0)]).build().unwrap();
        let ghost = AgentId(42);
        let err = swarm.remove_agent(ghost).err().unwrap();
        assert!(matches!(err, SimError::Grid(GridError::AgentNotFound(id)) if id == ghost));
        assert_eq!(swarm.remove_agent(AgentId::FIRST).unwrap(), c(0, 0));
        assert_eq!(swarm.grid().agent_count(), 0);
    }

    #[test]
    fn runtime_additions_join_the_next_tick() {
        let mut swarm = SwarmBuilder::new(SwarmConfig::with_size(5, 5))
            .goal([c(2, 2), c(2, 3)])
            .build()
            .unwrap();
        swarm.add_agents(&[c(0, 0)]).unwrap();
        swarm.add_agents_random(1).unwrap();
        assert!(swarm.run_until_converged(30, &mut crate::NoopObserver).is_some());
        assert_eq!(swarm.snapshot().claimed.len(), 2);
    }
}

// ── Reproducibility and invariants ────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use proptest::prelude::*;

    use super::*;
    use crate::{NoopObserver, SwarmBuilder};

    fn run(seed: u64, ticks: u64) -> Vec<crate::Snapshot> {
        let mut swarm = SwarmBuilder::new(SwarmConfig { seed, ..SwarmConfig::with_size(10, 10) })
            .goal(two_rows(4, 3))
            .random_agents(12)
            .build()
            .unwrap();
        (0..ticks)
            .map(|_| {
                swarm.tick(&mut NoopObserver);
                swarm.snapshot()
            })
            .collect()
    }

    #[test]
    fn same_seed_same_run() {
        assert_eq!(run(7, 25), run(7, 25));
    }

    proptest! {
        #[test]
        fn ticks_never_collide(
            seed   in any::<u64>(),
            torus  in any::<bool>(),
            sticky in any::<bool>(),
            goal   in prop::collection::vec((0u32..8, 0u32..8), 1..16),
            agents in 0usize..24,
            ticks  in 1u64..30,
        ) {
            let config = SwarmConfig {
                seed,
                topology:     if torus { Topology::Torus } else { Topology::Bounded },
                reached_mode: if sticky { ReachedMode::Sticky } else { ReachedMode::Live },
                ..SwarmConfig::with_size(8, 8)
            };
            let mut swarm = SwarmBuilder::new(config)
                .goal(goal.into_iter().map(|(r, k)| c(r, k)))
                .random_agents(agents)
                .build()
                .unwrap();

            for _ in 0..ticks {
                let report = swarm.tick(&mut NoopObserver);
                prop_assert_eq!(report.processed(), agents);
                prop_assert!(swarm.grid().is_consistent());

                let snap = swarm.snapshot();
                let mut cells: Vec<Cell> = snap.agents.iter().map(|a| a.cell).collect();
                cells.sort_by_key(|c| (c.row, c.col));
                cells.dedup();
                prop_assert_eq!(cells.len(), agents);
                prop_assert!(snap.claimed.len() <= snap.goal.len());
            }
        }
    }
}
