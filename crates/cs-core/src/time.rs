//! Simulation time model.
//!
//! # Design
//!
//! Time advances in discrete `Tick`s.  Each tick carries a time delta in
//! seconds, normally the fixed `SimConfig::tick_seconds`, which every timer
//! (waits, cooldowns, task progress) consumes.  `SimClock` tracks both the
//! tick counter and the accumulated simulated seconds, so a host that feeds
//! variable deltas still gets an exact elapsed-time reading.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus accumulated simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Default seconds per tick, used by [`advance`](Self::advance).
    pub tick_seconds: f64,
    /// The tick that will be processed next.
    pub current_tick: Tick,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new(tick_seconds: f64) -> Self {
        Self {
            tick_seconds,
            current_tick: Tick::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance by one tick of the default length.
    #[inline]
    pub fn advance(&mut self) {
        self.advance_by(self.tick_seconds);
    }

    /// Advance by one tick that lasted `dt` seconds.
    #[inline]
    pub fn advance_by(&mut self, dt: f64) {
        self.current_tick = self.current_tick.offset(1);
        self.elapsed_secs += dt;
    }

    /// How many default-length ticks cover `secs` seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs / self.tick_seconds).ceil().max(0.0) as u64
    }

    /// Back to tick 0 with no elapsed time.
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
        self.elapsed_secs = 0.0;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}
