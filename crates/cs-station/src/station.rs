//! A single task station and its three-state lifecycle.
//!
//! ```text
//!           try_occupy            advance(dt) reaches duration
//!   Free ───────────────▶ Occupied ─────────────────────────▶ Completed
//!    ▲                        │
//!    └──── force_release ─────┘
//!
//!   reset(): any state ──▶ Free
//! ```
//!
//! Calls that do not match the current state are no-ops returning `false`.

use cs_core::{AgentId, StationId, Vec2};

// ── StationSpec ───────────────────────────────────────────────────────────────

/// Setup-time description of one station.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSpec {
    pub position: Vec2,
    /// Seconds of work to complete.  `None` uses the pool-wide default.
    pub task_duration: Option<f64>,
}

impl StationSpec {
    pub fn at(position: Vec2) -> Self {
        Self { position, task_duration: None }
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.task_duration = Some(secs);
        self
    }
}

// ── StationState ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationState {
    Free,
    Occupied { occupant: AgentId },
    Completed,
}

impl StationState {
    pub fn as_str(self) -> &'static str {
        match self {
            StationState::Free            => "free",
            StationState::Occupied { .. } => "occupied",
            StationState::Completed       => "completed",
        }
    }
}

// ── Station ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Station {
    id:            StationId,
    position:      Vec2,
    task_duration: f64,
    state:         StationState,
    /// Seconds of work accumulated by the current occupant.
    progress:      f64,
}

impl Station {
    pub fn new(id: StationId, position: Vec2, task_duration: f64) -> Self {
        Self {
            id,
            position,
            task_duration,
            state:    StationState::Free,
            progress: 0.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn task_duration(&self) -> f64 {
        self.task_duration
    }

    #[inline]
    pub fn state(&self) -> StationState {
        self.state
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Completed fraction in `[0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        if self.task_duration <= 0.0 {
            return if self.is_completed() { 1.0 } else { 0.0 };
        }
        (self.progress / self.task_duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self.state, StationState::Free)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self.state, StationState::Occupied { .. })
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.state, StationState::Completed)
    }

    /// The agent holding the station, if `Occupied`.
    #[inline]
    pub fn occupant(&self) -> Option<AgentId> {
        match self.state {
            StationState::Occupied { occupant } => Some(occupant),
            _ => None,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Claim the station for `agent`.  Succeeds only while `Free`.
    pub fn try_occupy(&mut self, agent: AgentId) -> bool {
        if !self.is_free() {
            return false;
        }
        self.state = StationState::Occupied { occupant: agent };
        self.progress = 0.0;
        true
    }

    /// Accrue `dt` seconds of work.
    ///
    /// Returns `true` exactly once: on the call that brings `progress` up to
    /// `task_duration` and moves the station to `Completed`.  Every call made
    /// while not `Occupied` returns `false` and changes nothing.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.is_occupied() {
            return false;
        }
        self.progress = (self.progress + dt.max(0.0)).min(self.task_duration);
        if self.progress >= self.task_duration {
            self.state = StationState::Completed;
            return true;
        }
        false
    }

    /// Drop the occupant and discard progress.  Only affects an `Occupied`
    /// station; returns whether anything changed.
    pub fn force_release(&mut self) -> bool {
        if !self.is_occupied() {
            return false;
        }
        self.state = StationState::Free;
        self.progress = 0.0;
        true
    }

    /// Back to `Free` with zero progress from any state.
    pub fn reset(&mut self) {
        self.state = StationState::Free;
        self.progress = 0.0;
    }
}
