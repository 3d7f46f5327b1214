//! The `Sim` struct and its tick loop.

use cs_agent::{AgentRngs, AgentStore, BehaviorState};
use cs_behavior::{BehaviorModel, Intent, StepContext, Witnessed};
use cs_core::{AgentId, SimClock, SimConfig, Side, Tick, Vec2};
use cs_grid::{Grid, Pathfinder};
use cs_station::StationPool;

use crate::builder::Setup;
use crate::{EliminationEvent, SimObserver, SimulationStats};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B, P>` owns all simulation state and drives the tick loop:
///
/// 1. **Agents**: every living agent is stepped once, in ascending
///    `AgentId` order.  Each step runs to completion, intents included,
///    before the next agent starts.
///    - `TaskCompleted` → bump the agent's counter, notify the observer.
///    - `Eliminate`     → release the victim's station, mark it dead, notify
///      witnesses, notify the observer.
/// 2. **Counts**: recompute [`SimulationStats`] from agents and stations.
/// 3. **Win check**: adversaries first, then crew.  A win freezes the
///    simulation until [`reset`](Self::reset).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel, P: Pathfinder> {
    /// Global configuration (role counts, seed, tick length, …).
    pub config: SimConfig,

    /// Ticks processed and simulated seconds elapsed.
    pub clock: SimClock,

    /// Static walkability grid.
    pub grid: Grid,

    /// Agent state (SoA arrays).
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub stations: StationPool,

    /// The behavior model.  Called once per living agent per tick.
    pub behavior: B,

    pub pathfinder: P,

    pub(crate) setup:  Setup,
    pub(crate) winner: Option<Side>,
}

impl<B: BehaviorModel, P: Pathfinder> Sim<B, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a side wins or `config.max_ticks` ticks have been processed.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimulationStats {
        tracing::info!(
            agents   = self.agents.count,
            stations = self.stations.len(),
            "simulation started"
        );
        while !self.is_finished() && self.clock.current_tick.0 < self.config.max_ticks {
            self.step(observer);
        }

        let stats = self.stats();
        match stats.winner {
            Some(side) => tracing::info!(tick = stats.tick.0, winner = %side, "simulation ended"),
            None => tracing::info!(tick = stats.tick.0, "simulation ended without a winner"),
        }
        observer.on_sim_end(&stats);
        stats
    }

    /// Process up to `n` ticks (ignores `max_ticks`), stopping early on a
    /// win.  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimulationStats {
        for _ in 0..n {
            if self.is_finished() {
                break;
            }
            self.step(observer);
        }
        self.stats()
    }

    /// Process one tick of `config.tick_seconds`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimulationStats {
        self.step_dt(self.config.tick_seconds, observer)
    }

    /// Process one tick lasting `dt` seconds.
    ///
    /// Once a side has won this is a no-op returning the frozen statistics.
    pub fn step_dt<O: SimObserver>(&mut self, dt: f64, observer: &mut O) -> SimulationStats {
        if self.is_finished() {
            return self.stats();
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // Agents eliminated earlier in this tick are skipped.
        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            if self.agents.is_alive(agent) {
                self.step_agent(agent, now, dt, observer);
            }
        }

        self.clock.advance_by(dt);
        let mut stats = self.stats();
        self.winner = stats.terminal_side(self.config.adversary_win_threshold);
        stats.winner = self.winner;
        observer.on_tick_end(&stats);

        if let Some(side) = self.winner {
            tracing::info!(tick = now.0, winner = %side, "game over");
            observer.on_game_over(now, side);
        }
        stats
    }

    /// Eliminate `victim` at its current position, as if by `killer`.
    ///
    /// Returns `None` if the victim is already dead or does not exist.  The
    /// win condition is evaluated on the next tick.
    pub fn eliminate(&mut self, victim: AgentId, killer: Option<AgentId>) -> Option<EliminationEvent> {
        let at = *self.agents.position.get(victim.index())?;
        let now = self.clock.current_tick;
        let dt = self.config.tick_seconds;
        self.eliminate_at(victim, killer, at, now, dt)
    }

    /// Rebuild every agent and station from the setup the simulation was
    /// built with.  The grid is kept.
    pub fn reset(&mut self) {
        let (agents, rngs) = self.setup.spawn_agents(&self.config, &self.behavior);
        self.agents = agents;
        self.rngs = rngs;
        self.stations = self.setup.spawn_stations(&self.config);
        self.clock.reset();
        self.winner = None;
        tracing::info!(
            agents   = self.agents.count,
            stations = self.stations.len(),
            "simulation reset"
        );
    }

    /// Counts as of the last processed tick.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats::collect(
            self.clock.current_tick,
            self.clock.elapsed_secs,
            &self.agents,
            &self.stations,
            self.winner,
        )
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    // ── Per-agent processing ──────────────────────────────────────────────

    fn step_agent<O: SimObserver>(&mut self, agent: AgentId, now: Tick, dt: f64, observer: &mut O) {
        let mut actor = self.agents.take_actor(agent);
        let intents = {
            let mut ctx = StepContext::new(
                now,
                dt,
                &self.grid,
                &self.pathfinder,
                &mut self.stations,
                &self.agents,
            );
            self.behavior.step(&mut actor, &mut ctx, self.rngs.get_mut(agent))
        };
        self.agents.restore(actor);

        for intent in intents {
            match intent {
                Intent::Eliminate { victim, at } => {
                    if let Some(event) = self.eliminate_at(victim, Some(agent), at, now, dt) {
                        observer.on_elimination(&event);
                    }
                }
                Intent::TaskCompleted { station } => {
                    self.agents.tasks_completed[agent.index()] += 1;
                    tracing::debug!(tick = now.0, %agent, %station, "task completed");
                    observer.on_task_completed(now, agent, station);
                }
                Intent::TaskFaked { station } => {
                    tracing::debug!(tick = now.0, %agent, %station, "fake task released");
                }
            }
        }
    }

    /// Release the victim's station, mark it dead, then let every living
    /// agent within the witness radius react.
    fn eliminate_at(
        &mut self,
        victim: AgentId,
        killer: Option<AgentId>,
        at:     Vec2,
        now:    Tick,
        dt:     f64,
    ) -> Option<EliminationEvent> {
        if !self.agents.is_alive(victim) {
            return None;
        }

        // ── Cancel the victim's task before it is marked dead ─────────────
        let released_station = self
            .stations
            .iter()
            .find(|s| s.occupant() == Some(victim))
            .map(|s| s.id());
        if let Some(st) = released_station.and_then(|id| self.stations.get_mut(id)) {
            st.force_release();
        }

        let i = victim.index();
        self.agents.alive[i] = false;
        self.agents.mind[i].clear_path();
        self.agents.mind[i].state = BehaviorState::Dead;

        // ── Witness fan-out ───────────────────────────────────────────────
        let r2 = self.config.witness_radius * self.config.witness_radius;
        let witnesses: Vec<AgentId> = self
            .agents
            .agent_ids()
            .filter(|&a| {
                a != victim
                    && Some(a) != killer
                    && self.agents.is_alive(a)
                    && self.agents.position[a.index()].distance_sq(at) <= r2
            })
            .collect();

        let seen = Witnessed { victim, killer, at };
        for &witness in &witnesses {
            let mut actor = self.agents.take_actor(witness);
            {
                let mut ctx = StepContext::new(
                    now,
                    dt,
                    &self.grid,
                    &self.pathfinder,
                    &mut self.stations,
                    &self.agents,
                );
                self.behavior.on_witness(&mut actor, &seen, &mut ctx, self.rngs.get_mut(witness));
            }
            self.agents.restore(actor);
        }

        tracing::debug!(
            tick      = now.0,
            %victim,
            killer    = ?killer,
            witnesses = witnesses.len(),
            "agent eliminated"
        );

        Some(EliminationEvent {
            tick: now,
            victim,
            killer,
            position: at,
            witnesses,
            released_station,
        })
    }
}
