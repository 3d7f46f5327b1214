//! Plain data row types written by output backends.

use cs_core::Side;
use cs_sim::{EliminationEvent, SimulationStats};

/// Counts at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub elapsed_secs:       f64,
    pub alive_crewmates:    u32,
    pub alive_adversaries:  u32,
    pub eliminated:         u32,
    pub stations_busy:      u32,
    pub stations_completed: u32,
    pub stations_total:     u32,
    pub task_progress:      f64,
    pub winner:             Option<Side>,
}

impl From<&SimulationStats> for TickSummaryRow {
    fn from(s: &SimulationStats) -> Self {
        Self {
            tick:               s.tick.0,
            elapsed_secs:       s.elapsed_secs,
            alive_crewmates:    s.alive_crewmates as u32,
            alive_adversaries:  s.alive_adversaries as u32,
            eliminated:         s.eliminated as u32,
            stations_busy:      s.stations_busy as u32,
            stations_completed: s.stations_completed as u32,
            stations_total:     s.stations_total as u32,
            task_progress:      s.task_progress,
            winner:             s.winner,
        }
    }
}

/// One elimination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationRow {
    pub tick:             u64,
    pub victim:           u32,
    /// `u32::MAX` when no killer is known.
    pub killer:           u32,
    pub x:                f64,
    pub y:                f64,
    pub witnesses:        u32,
    /// `u32::MAX` if the victim held no station.
    pub released_station: u32,
}

impl From<&EliminationEvent> for EliminationRow {
    fn from(e: &EliminationEvent) -> Self {
        Self {
            tick:             e.tick.0,
            victim:           e.victim.0,
            killer:           e.killer.map_or(u32::MAX, |k| k.0),
            x:                e.position.x,
            y:                e.position.y,
            witnesses:        e.witnesses.len() as u32,
            released_station: e.released_station.map_or(u32::MAX, |s| s.0),
        }
    }
}
