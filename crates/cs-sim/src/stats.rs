//! Aggregate counts derived from agent and station state.

use cs_agent::AgentStore;
use cs_core::{AgentId, Role, Side, StationId, Tick, Vec2};
use cs_station::StationPool;

/// Read-only snapshot of the simulation.  Always recomputed from the agent
/// store and station pool; never stored as a source of truth.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationStats {
    /// Ticks processed so far.
    pub tick:               Tick,
    pub elapsed_secs:       f64,
    pub total_agents:       usize,
    pub total_crewmates:    usize,
    pub alive_crewmates:    usize,
    pub alive_adversaries:  usize,
    pub eliminated:         usize,
    pub stations_total:     usize,
    pub stations_busy:      usize,
    pub stations_completed: usize,
    /// Mean station progress in `[0, 1]`, partial work included.
    pub task_progress:      f64,
    pub winner:             Option<Side>,
}

impl SimulationStats {
    pub(crate) fn collect(
        tick:         Tick,
        elapsed_secs: f64,
        agents:       &AgentStore,
        stations:     &StationPool,
        winner:       Option<Side>,
    ) -> Self {
        let alive_crewmates = agents.alive_count(Role::Crewmate);
        let alive_adversaries = agents.alive_count(Role::Adversary);
        Self {
            tick,
            elapsed_secs,
            total_agents:       agents.count,
            total_crewmates:    agents.count_role(Role::Crewmate),
            alive_crewmates,
            alive_adversaries,
            eliminated:         agents.count - alive_crewmates - alive_adversaries,
            stations_total:     stations.len(),
            stations_busy:      stations.busy_count(),
            stations_completed: stations.completed_count(),
            task_progress:      stations.task_progress(),
            winner,
        }
    }

    #[inline]
    pub fn alive(&self) -> usize {
        self.alive_crewmates + self.alive_adversaries
    }

    /// Completed stations as a fraction of all stations.
    pub fn completion(&self) -> f64 {
        if self.stations_total == 0 {
            0.0
        } else {
            self.stations_completed as f64 / self.stations_total as f64
        }
    }

    /// Evaluate the terminal conditions against these counts.
    ///
    /// The adversary condition is checked first, so a tick in which the last
    /// crewmate falls and the last station completes is an adversary win.
    pub fn terminal_side(&self, adversary_win_threshold: usize) -> Option<Side> {
        if self.alive_crewmates <= adversary_win_threshold {
            Some(Side::Adversaries)
        } else if self.stations_total > 0 && self.stations_completed == self.stations_total {
            Some(Side::Crew)
        } else {
            None
        }
    }
}

/// One elimination, as reported to observers.
#[derive(Clone, Debug, PartialEq)]
pub struct EliminationEvent {
    pub tick:             Tick,
    pub victim:           AgentId,
    /// `None` for eliminations requested by the host.
    pub killer:           Option<AgentId>,
    pub position:         Vec2,
    /// Living agents notified within the witness radius.
    pub witnesses:        Vec<AgentId>,
    /// Station the victim was occupying, now `Free` again.
    pub released_station: Option<StationId>,
}
