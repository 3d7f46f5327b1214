//! Deterministic per-agent and host-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent owns an independent `SmallRng` seeded by
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! where the constant is the 64-bit fractional part of the golden ratio.
//! An agent's draws therefore depend only on the run seed, its own ID and
//! its own history, never on how many draws other agents made earlier in
//! the tick.  Reseeding every agent from the same seed on reset replays the
//! exact same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform `f64` in `[lo, hi)`; returns `lo` when the range is empty.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            lo
        } else {
            self.0.gen_range(lo..hi)
        }
    }

    /// A uniformly distributed unit vector.
    pub fn unit_direction(&mut self) -> Vec2 {
        let angle = self.0.gen_range(0.0..std::f64::consts::TAU);
        Vec2::new(angle.cos(), angle.sin())
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Host-level RNG for draws that belong to no agent (spawn placement, map
/// generation).  Single-threaded use only.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one per placement pass.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform `f64` in `[lo, hi)`; returns `lo` when the range is empty.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            lo
        } else {
            self.0.gen_range(lo..hi)
        }
    }

    /// Uniform point inside the axis-aligned box `[min, max)`.
    pub fn point_in(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(self.uniform(min.x, max.x), self.uniform(min.y, max.y))
    }
}
