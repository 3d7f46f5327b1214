//! Per-agent behavior state.
//!
//! Every timer an agent waits on (backoff, fake task, flee, elimination
//! cooldown, target scan) is an explicit field counted down by the tick's
//! `dt`, so an agent can be suspended between any two ticks and resumed
//! without keeping call-stack state.

use cs_core::{AgentId, StationId};
use cs_grid::Path;

// ── TaskMode ──────────────────────────────────────────────────────────────────

/// How an occupied station is being worked.  Drawn once when the task starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TaskMode {
    /// Progress accrues on the station until it completes.
    Real,
    /// No progress accrues; the station is released when `remaining` hits 0.
    Fake { remaining: f64 },
}

// ── BehaviorState ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum BehaviorState {
    /// Ready to pick a station.
    #[default]
    Idle,
    /// Backing off (and roaming) after a failed search or unreachable target.
    Waiting { remaining: f64 },
    /// Walking to `station`.
    Traveling { station: StationId },
    /// Holding `station`.
    PerformingTask { station: StationId, mode: TaskMode },
    /// Running from a threat.
    Fleeing { remaining: f64 },
    /// Closing in on `target` for an elimination.
    Pursuing { target: AgentId },
    /// Terminal.  No further steps are processed.
    Dead,
}

impl BehaviorState {
    pub fn name(&self) -> &'static str {
        match self {
            BehaviorState::Idle                 => "idle",
            BehaviorState::Waiting { .. }       => "waiting",
            BehaviorState::Traveling { .. }     => "traveling",
            BehaviorState::PerformingTask { .. } => "performing_task",
            BehaviorState::Fleeing { .. }       => "fleeing",
            BehaviorState::Pursuing { .. }      => "pursuing",
            BehaviorState::Dead                 => "dead",
        }
    }

    /// Station this state refers to, if any.
    pub fn station(&self) -> Option<StationId> {
        match *self {
            BehaviorState::Traveling { station }          => Some(station),
            BehaviorState::PerformingTask { station, .. } => Some(station),
            _ => None,
        }
    }
}

// ── AgentMind ─────────────────────────────────────────────────────────────────

/// Mutable per-agent state owned by the agent alone.
#[derive(Clone, Debug, Default)]
pub struct AgentMind {
    pub state:          BehaviorState,
    /// Route currently being walked.  Empty when standing still.
    pub path:           Path,
    /// Index of the next waypoint in `path`.
    pub waypoint_index: usize,
    /// Current station search radius.
    pub search_radius:  f64,
    /// Seconds until the next elimination is allowed.  Unused by crewmates.
    pub kill_cooldown:  f64,
    /// Seconds until the next target scan.  Unused by crewmates.
    pub scan_timer:     f64,
}

impl AgentMind {
    pub fn new(search_radius: f64, kill_cooldown: f64) -> Self {
        Self {
            search_radius,
            kill_cooldown,
            ..Self::default()
        }
    }

    /// Start walking `path` from its first waypoint.
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.waypoint_index = 0;
    }

    pub fn clear_path(&mut self) {
        self.set_path(Path::empty());
    }

    /// `true` while waypoints remain.
    pub fn has_path(&self) -> bool {
        self.waypoint_index < self.path.len()
    }

    /// The station the agent is heading to or holding.
    pub fn target_station(&self) -> Option<StationId> {
        self.state.station()
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, BehaviorState::Dead)
    }
}
