//! Integration tests for cs-sim.
//!
//! Scenarios run on a 20 × 20 open grid whose cell `(x, y)` is centred at
//! `(x + 0.5, y + 0.5)`.

use std::sync::atomic::{AtomicUsize, Ordering};

use cs_agent::{Actor, BehaviorState};
use cs_behavior::{BehaviorModel, Intent, NoopBehavior, StationBehavior, StepContext};
use cs_core::{AgentId, AgentRng, Role, SimConfig, Side, StationId, Tick, Vec2};
use cs_grid::{AStarPathfinder, Grid, GridSpec};
use cs_station::StationSpec;

use crate::{EliminationEvent, NoopObserver, Sim, SimBuilder, SimError, SimObserver, SimulationStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f64 + 0.5, y as f64 + 0.5)
}

fn grid_spec() -> GridSpec {
    GridSpec {
        center:      Vec2::new(10.0, 10.0),
        world_size:  Vec2::new(20.0, 20.0),
        cell_radius: 0.5,
    }
}

fn open_grid() -> Grid {
    Grid::build(&grid_spec(), |_| false).unwrap()
}

/// Open grid with a wall along column x = 10.
fn walled_grid() -> Grid {
    Grid::build(&grid_spec(), |p| p.x.floor() as i64 == 10).unwrap()
}

fn test_config(crewmates: usize, adversaries: usize) -> SimConfig {
    SimConfig {
        crewmates,
        adversaries,
        tick_seconds:  0.1,
        max_ticks:     2_000,
        task_duration: 1.0,
        ..SimConfig::default()
    }
}

fn stations(points: &[Vec2]) -> Vec<StationSpec> {
    points.iter().map(|&p| StationSpec::at(p)).collect()
}

fn station_sim(
    config:  SimConfig,
    points:  &[Vec2],
    spawns:  Vec<Vec2>,
) -> Sim<StationBehavior, AStarPathfinder> {
    let behavior = StationBehavior::from_config(&config).unwrap();
    SimBuilder::new(config, open_grid(), behavior, AStarPathfinder)
        .stations(stations(points))
        .spawns(spawns)
        .build()
        .unwrap()
}

/// Ten-agent scenario: eight crewmates, two adversaries, six stations.
fn crowded_sim(seed: u64) -> Sim<StationBehavior, AStarPathfinder> {
    let config = SimConfig { seed, max_ticks: 30_000, ..test_config(8, 2) };
    let spawns = (0..10).map(|i| c(1 + 2 * i, 3 + (i % 3))).collect();
    station_sim(
        config,
        &[c(3, 10), c(10, 3), c(16, 16), c(10, 10), c(16, 4), c(4, 16)],
        spawns,
    )
}

/// Records every observer callback.
#[derive(Default)]
struct Recorder {
    starts:       usize,
    ends:         usize,
    completions:  Vec<(Tick, AgentId, StationId)>,
    eliminations: Vec<EliminationEvent>,
    game_over:    Vec<(Tick, Side)>,
    final_stats:  Option<SimulationStats>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }
    fn on_tick_end(&mut self, _stats: &SimulationStats) {
        self.ends += 1;
    }
    fn on_task_completed(&mut self, tick: Tick, agent: AgentId, station: StationId) {
        self.completions.push((tick, agent, station));
    }
    fn on_elimination(&mut self, event: &EliminationEvent) {
        self.eliminations.push(event.clone());
    }
    fn on_game_over(&mut self, tick: Tick, winner: Side) {
        self.game_over.push((tick, winner));
    }
    fn on_sim_end(&mut self, stats: &SimulationStats) {
        self.final_stats = Some(stats.clone());
    }
}

/// Counts `step` calls.
struct CountSteps(AtomicUsize);

impl BehaviorModel for CountSteps {
    fn step(&self, _a: &mut Actor, _ctx: &mut StepContext<'_>, _r: &mut AgentRng) -> Vec<Intent> {
        self.0.fetch_add(1, Ordering::Relaxed);
        vec![]
    }
}

/// `killer` eliminates `victim` on its first step while the victim lives.
struct Assassin {
    killer: AgentId,
    victim: AgentId,
}

impl BehaviorModel for Assassin {
    fn step(&self, actor: &mut Actor, ctx: &mut StepContext<'_>, _r: &mut AgentRng) -> Vec<Intent> {
        if actor.id == self.killer && ctx.agents.is_alive(self.victim) {
            let at = ctx.agents.position[self.victim.index()];
            return vec![Intent::Eliminate { victim: self.victim, at }];
        }
        vec![]
    }
}

fn scripted_sim<B: BehaviorModel>(config: SimConfig, behavior: B, spawns: Vec<Vec2>) -> Sim<B, AStarPathfinder> {
    SimBuilder::new(config, open_grid(), behavior, AStarPathfinder)
        .stations(stations(&[c(18, 18)]))
        .spawns(spawns)
        .build()
        .unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    fn builder(config: SimConfig) -> SimBuilder<NoopBehavior, AStarPathfinder> {
        SimBuilder::new(config, open_grid(), NoopBehavior, AStarPathfinder)
    }

    #[test]
    fn default_roles_put_crewmates_first() {
        let sim = station_sim(test_config(2, 1), &[c(5, 5)], vec![c(1, 1), c(2, 2), c(3, 3)]);
        assert_eq!(sim.agents.role, vec![Role::Crewmate, Role::Crewmate, Role::Adversary]);
        assert_eq!(sim.agents.mind[0].kill_cooldown, 0.0);
        assert_eq!(sim.agents.mind[2].kill_cooldown, 15.0);
        assert_eq!(sim.agents.mind[0].search_radius, 4.0);
        assert_eq!(sim.stats().stations_total, 1);
        assert_eq!(sim.winner(), None);
    }

    #[test]
    fn explicit_roles_respected() {
        let sim = builder(test_config(2, 1))
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1), c(2, 2), c(3, 3)])
            .roles(vec![Role::Adversary, Role::Crewmate, Role::Crewmate])
            .build()
            .unwrap();
        assert_eq!(sim.agents.role_of(AgentId(0)), Role::Adversary);
    }

    #[test]
    fn role_counts_must_match_config() {
        let result = builder(test_config(2, 1))
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1), c(2, 2), c(3, 3)])
            .roles(vec![Role::Crewmate; 3])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));

        let result = builder(test_config(2, 1))
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1), c(2, 2), c(3, 3)])
            .roles(vec![Role::Crewmate, Role::Adversary])
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { what: "roles", .. })));
    }

    #[test]
    fn spawns_required() {
        let result = builder(test_config(1, 0)).stations(stations(&[c(5, 5)])).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn spawn_count_mismatch_errors() {
        let result = builder(test_config(3, 0))
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1); 2])
            .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 2, what: "spawn points" })
        ));
    }

    #[test]
    fn spawn_must_be_walkable_and_inside() {
        let result = SimBuilder::new(test_config(1, 0), walled_grid(), NoopBehavior, AStarPathfinder)
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(10, 4)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));

        let result = builder(test_config(1, 0))
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![Vec2::new(-3.0, 4.0)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_stations_rejected() {
        let result = builder(test_config(1, 0)).spawns(vec![c(1, 1)]).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn station_checks() {
        let result = builder(test_config(1, 0))
            .stations(vec![StationSpec::at(c(5, 5)).with_duration(0.0)])
            .spawns(vec![c(1, 1)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));

        let result = SimBuilder::new(test_config(1, 0), walled_grid(), NoopBehavior, AStarPathfinder)
            .stations(stations(&[c(10, 10)]))
            .spawns(vec![c(1, 1)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_config_surfaces_core_error() {
        let config = SimConfig { tick_seconds: 0.0, ..test_config(1, 0) };
        let result = builder(config)
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1)])
            .build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn win_threshold_at_crew_size_rejected() {
        let config = SimConfig { adversary_win_threshold: 4, ..test_config(4, 1) };
        assert!(StationBehavior::from_config(&config).is_err());
        let result = builder(config)
            .stations(stations(&[c(5, 5)]))
            .spawns(vec![c(1, 1), c(2, 1), c(3, 1), c(4, 1), c(5, 1)])
            .build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn noop_runs_to_max_ticks() {
        let config = SimConfig { max_ticks: 10, ..test_config(2, 0) };
        let mut sim = scripted_sim(config, NoopBehavior, vec![c(1, 1), c(2, 2)]);
        let mut obs = Recorder::default();
        let stats = sim.run(&mut obs);
        assert_eq!(stats.tick, Tick(10));
        assert_eq!(stats.winner, None);
        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends, 10);
        assert!(obs.game_over.is_empty());
        assert_eq!(obs.final_stats, Some(stats));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = scripted_sim(test_config(1, 0), NoopBehavior, vec![c(1, 1)]);
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn step_dt_accumulates_elapsed_time() {
        let mut sim = scripted_sim(test_config(1, 0), NoopBehavior, vec![c(1, 1)]);
        sim.step_dt(0.5, &mut NoopObserver);
        let stats = sim.step_dt(0.25, &mut NoopObserver);
        assert_eq!(stats.tick, Tick(2));
        assert!((stats.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn only_living_agents_are_stepped() {
        let mut sim = scripted_sim(
            test_config(3, 0),
            CountSteps(AtomicUsize::new(0)),
            vec![c(1, 1), c(2, 2), c(3, 3)],
        );
        sim.step(&mut NoopObserver);
        assert_eq!(sim.behavior.0.load(Ordering::Relaxed), 3);
        assert!(sim.eliminate(AgentId(1), None).is_some());
        sim.step(&mut NoopObserver);
        assert_eq!(sim.behavior.0.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn stats_reflect_counts() {
        let mut sim = scripted_sim(test_config(2, 1), NoopBehavior, vec![c(1, 1), c(2, 2), c(3, 3)]);
        sim.eliminate(AgentId(0), None);
        let stats = sim.stats();
        assert_eq!(stats.total_agents, 3);
        assert_eq!(stats.total_crewmates, 2);
        assert_eq!(stats.alive_crewmates, 1);
        assert_eq!(stats.alive_adversaries, 1);
        assert_eq!(stats.alive(), 2);
        assert_eq!(stats.eliminated, 1);
        assert_eq!(stats.completion(), 0.0);
        assert_eq!(stats.task_progress, 0.0);
    }
}

// ── Win conditions ────────────────────────────────────────────────────────────

#[cfg(test)]
mod win_tests {
    use super::*;

    fn crew_only_sim() -> Sim<StationBehavior, AStarPathfinder> {
        station_sim(
            test_config(4, 0),
            &[c(4, 4), c(7, 4), c(4, 7)],
            vec![c(3, 3), c(5, 3), c(7, 3), c(3, 6)],
        )
    }

    #[test]
    fn crew_wins_when_all_stations_complete() {
        let mut sim = crew_only_sim();
        let mut obs = Recorder::default();
        let stats = sim.run(&mut obs);

        assert_eq!(stats.winner, Some(Side::Crew));
        assert_eq!(stats.stations_completed, 3);
        assert_eq!(stats.stations_busy, 0);
        assert_eq!(stats.task_progress, 1.0);
        assert_eq!(obs.completions.len(), 3);
        assert_eq!(obs.game_over.len(), 1);
        assert_eq!(obs.game_over[0].1, Side::Crew);
        assert_eq!(sim.agents.tasks_completed.iter().sum::<u32>(), 3);
    }

    #[test]
    fn simulation_freezes_after_a_win() {
        let mut sim = crew_only_sim();
        let stats = sim.run(&mut NoopObserver);
        let positions = sim.agents.position.clone();

        let mut obs = Recorder::default();
        let after = sim.run_ticks(50, &mut obs);
        assert_eq!(after, stats);
        assert_eq!(sim.step(&mut obs), stats);
        assert_eq!(obs.starts, 0);
        assert!(obs.game_over.is_empty());
        assert_eq!(sim.agents.position, positions);
    }

    #[test]
    fn adversaries_win_when_crew_eliminated() {
        let assassin = Assassin { killer: AgentId(1), victim: AgentId(0) };
        let mut sim = scripted_sim(test_config(1, 1), assassin, vec![c(5, 5), c(6, 5)]);
        let mut obs = Recorder::default();
        let stats = sim.step(&mut obs);

        assert_eq!(stats.winner, Some(Side::Adversaries));
        assert_eq!(stats.alive_crewmates, 0);
        assert_eq!(obs.eliminations.len(), 1);
        assert_eq!(obs.eliminations[0].killer, Some(AgentId(1)));
        assert_eq!(obs.eliminations[0].position, c(5, 5));
        assert_eq!(obs.game_over, vec![(Tick(0), Side::Adversaries)]);
    }

    #[test]
    fn threshold_ends_game_early() {
        let config = SimConfig { adversary_win_threshold: 2, ..test_config(3, 1) };
        let mut sim = scripted_sim(config, NoopBehavior, vec![c(1, 1), c(2, 2), c(3, 3), c(4, 4)]);
        assert_eq!(sim.step(&mut NoopObserver).winner, None);
        sim.eliminate(AgentId(0), None);
        assert_eq!(sim.step(&mut NoopObserver).winner, Some(Side::Adversaries));
    }

    #[test]
    fn elimination_checked_before_completion() {
        let mut sim = scripted_sim(test_config(1, 0), NoopBehavior, vec![c(1, 1)]);
        let st = sim.stations.get_mut(StationId(0)).unwrap();
        assert!(st.try_occupy(AgentId(0)));
        assert!(st.advance(100.0));
        sim.eliminate(AgentId(0), None);

        let stats = sim.step(&mut NoopObserver);
        assert_eq!(stats.stations_completed, stats.stations_total);
        assert_eq!(stats.winner, Some(Side::Adversaries));
    }

    #[test]
    fn hunting_adversary_wins_alone() {
        let config = SimConfig {
            adversary: cs_core::AdversaryParams {
                initial_kill_cooldown: 0.0,
                ..Default::default()
            },
            ..test_config(1, 1)
        };
        let mut sim = station_sim(config, &[c(18, 18)], vec![c(5, 5), c(6, 5)]);
        let mut obs = Recorder::default();
        let stats = sim.run(&mut obs);

        assert_eq!(stats.winner, Some(Side::Adversaries));
        assert_eq!(obs.eliminations.len(), 1);
        assert_eq!(obs.eliminations[0].victim, AgentId(0));
        assert_eq!(obs.eliminations[0].killer, Some(AgentId(1)));
        assert_eq!(sim.agents.mind[0].state, BehaviorState::Dead);
    }

    #[test]
    fn six_stations_four_crew_one_idle_adversary() {
        let config = SimConfig {
            adversary: cs_core::AdversaryParams {
                initial_kill_cooldown: 1.0e6,
                ..Default::default()
            },
            ..test_config(4, 1)
        };
        let mut sim = station_sim(
            config,
            &[c(3, 10), c(10, 3), c(10, 10), c(6, 6), c(3, 6), c(8, 12)],
            vec![c(2, 2), c(4, 2), c(6, 2), c(8, 2), c(5, 4)],
        );
        let mut obs = Recorder::default();
        let stats = sim.run(&mut obs);

        assert_eq!(stats.winner, Some(Side::Crew));
        assert!(obs.eliminations.is_empty());
        assert_eq!(stats.stations_completed, 6);

        // Frozen: further ticks change nothing on any station.
        let progress: Vec<f64> = sim.stations.iter().map(|s| s.progress()).collect();
        sim.run_ticks(20, &mut NoopObserver);
        let after: Vec<f64> = sim.stations.iter().map(|s| s.progress()).collect();
        assert_eq!(progress, after);
    }

    #[test]
    fn crowded_run_reaches_a_verdict() {
        let mut sim = crowded_sim(7);
        let stats = sim.run(&mut NoopObserver);
        assert!(stats.winner.is_some(), "no winner after {}", stats.tick);
    }
}

// ── Eliminations and witnesses ────────────────────────────────────────────────

#[cfg(test)]
mod elimination_tests {
    use super::*;

    #[test]
    fn eliminating_a_worker_releases_its_station() {
        let config = test_config(2, 0);
        let behavior = StationBehavior::from_config(&config).unwrap();
        let mut sim = SimBuilder::new(config, open_grid(), behavior, AStarPathfinder)
            .stations(vec![
                StationSpec::at(c(2, 2)).with_duration(100.0),
                StationSpec::at(c(4, 2)).with_duration(100.0),
            ])
            .spawns(vec![c(2, 2), c(4, 2)])
            .build()
            .unwrap();

        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.stations.get(StationId(0)).unwrap().occupant(), Some(AgentId(0)));
        assert_eq!(sim.stations.get(StationId(1)).unwrap().occupant(), Some(AgentId(1)));

        let event = sim.eliminate(AgentId(0), None).unwrap();
        assert_eq!(event.released_station, Some(StationId(0)));
        assert_eq!(event.witnesses, vec![AgentId(1)]);

        let st = sim.stations.get(StationId(0)).unwrap();
        assert!(st.is_free());
        assert_eq!(st.progress(), 0.0);
        assert_eq!(sim.agents.mind[0].state, BehaviorState::Dead);
        assert!(!sim.agents.is_alive(AgentId(0)));

        // The witness abandoned its own task and ran.
        assert!(sim.stations.get(StationId(1)).unwrap().is_free());
        assert!(matches!(sim.agents.mind[1].state, BehaviorState::Fleeing { .. }));
    }

    #[test]
    fn eliminating_twice_is_a_no_op() {
        let mut sim = scripted_sim(test_config(2, 0), NoopBehavior, vec![c(1, 1), c(2, 2)]);
        assert!(sim.eliminate(AgentId(0), None).is_some());
        assert!(sim.eliminate(AgentId(0), None).is_none());
        assert!(sim.eliminate(AgentId(9), None).is_none());
        assert_eq!(sim.stats().eliminated, 1);
    }

    #[test]
    fn witnesses_exclude_killer_victim_and_distant_agents() {
        let assassin = Assassin { killer: AgentId(3), victim: AgentId(0) };
        let mut sim = scripted_sim(
            test_config(3, 1),
            assassin,
            vec![c(5, 5), c(7, 5), c(15, 15), c(6, 5)],
        );
        let mut obs = Recorder::default();
        sim.step(&mut obs);
        assert_eq!(obs.eliminations.len(), 1);
        assert_eq!(obs.eliminations[0].witnesses, vec![AgentId(1)]);
        assert_eq!(obs.eliminations[0].released_station, None);
    }

    #[test]
    fn occupied_stations_always_have_a_living_worker() {
        let mut sim = crowded_sim(11);
        for _ in 0..sim.config.max_ticks {
            if sim.is_finished() {
                break;
            }
            sim.step(&mut NoopObserver);
            for st in sim.stations.iter() {
                if let Some(agent) = st.occupant() {
                    assert!(sim.agents.is_alive(agent), "{} held by dead {agent}", st.id());
                    assert!(matches!(
                        sim.agents.mind[agent.index()].state,
                        BehaviorState::PerformingTask { station, .. } if station == st.id()
                    ));
                }
            }
        }
    }
}

// ── Contention ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod race_tests {
    use super::*;

    #[test]
    fn first_in_order_wins_a_station() {
        let config = test_config(2, 0);
        let behavior = StationBehavior::from_config(&config).unwrap();
        let mut sim = SimBuilder::new(config, open_grid(), behavior, AStarPathfinder)
            .stations(vec![StationSpec::at(c(5, 5)).with_duration(100.0)])
            .spawns(vec![c(5, 5), c(5, 5)])
            .build()
            .unwrap();

        sim.run_ticks(2, &mut NoopObserver);
        assert_eq!(sim.stations.get(StationId(0)).unwrap().occupant(), Some(AgentId(0)));
        assert!(matches!(sim.agents.mind[0].state, BehaviorState::PerformingTask { .. }));
        assert_eq!(sim.agents.mind[1].state, BehaviorState::Idle);
    }
}

// ── Reset and determinism ─────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_restores_initial_state() {
        let spawns = vec![c(3, 3), c(5, 3), c(7, 3), c(3, 6)];
        let mut sim = station_sim(test_config(4, 0), &[c(4, 4), c(7, 4), c(4, 7)], spawns.clone());
        sim.run(&mut NoopObserver);
        assert!(sim.is_finished());

        sim.reset();
        let stats = sim.stats();
        assert_eq!(stats.tick, Tick(0));
        assert_eq!(stats.elapsed_secs, 0.0);
        assert_eq!(stats.winner, None);
        assert_eq!(stats.alive(), 4);
        assert_eq!(stats.stations_completed, 0);
        assert_eq!(sim.agents.position, spawns);
        assert!(sim.agents.tasks_completed.iter().all(|&n| n == 0));
        assert!(sim.agents.mind.iter().all(|m| m.state == BehaviorState::Idle));
        assert!(sim.stations.iter().all(|s| s.is_free() && s.progress() == 0.0));

        // And it runs again.
        assert_eq!(sim.run(&mut NoopObserver).winner, Some(Side::Crew));
    }

    #[test]
    fn reset_replays_the_same_run() {
        let mut sim = crowded_sim(3);
        let first = sim.run_ticks(400, &mut NoopObserver);
        let positions = sim.agents.position.clone();

        sim.reset();
        let second = sim.run_ticks(400, &mut NoopObserver);
        assert_eq!(first, second);
        assert_eq!(sim.agents.position, positions);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = crowded_sim(99);
        let mut b = crowded_sim(99);
        assert_eq!(a.run_ticks(500, &mut NoopObserver), b.run_ticks(500, &mut NoopObserver));
        assert_eq!(a.agents.position, b.agents.position);
        assert_eq!(a.agents.alive, b.agents.alive);
    }
}
