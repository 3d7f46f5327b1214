//! Simulation configuration.
//!
//! All tunables are plain data passed into the core at setup.  There is no
//! global instance: the host constructs a `SimConfig` (in code or from a
//! TOML file via the `serde` feature) and hands it to the simulation builder.
//!
//! Defaults describe the standard ten-agent scenario, measured in world
//! units and seconds.

use crate::{CoreError, CoreResult};

// ── AgentParams ───────────────────────────────────────────────────────────────

/// Movement and station-search parameters shared by every role.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentParams {
    /// World units per second.
    pub move_speed: f64,
    /// An agent within this distance of a waypoint counts as having reached it.
    pub waypoint_reach: f64,
    /// Initial station search radius.
    pub base_search_radius: f64,
    /// Upper bound for the expanding search radius.
    pub max_search_radius: f64,
    /// Radius growth per second spent waiting without finding a station.
    pub search_radius_growth: f64,
    /// How long an agent waits (and roams) after a failed search or an
    /// unreachable target.
    pub wait_backoff_secs: f64,
    /// Maximum distance of the random roam point picked while waiting.
    /// `0` disables roaming.
    pub roam_radius: f64,
    /// How long a flee lasts.
    pub flee_secs: f64,
    /// Distance of the point an agent runs to when fleeing.
    pub flee_distance: f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            move_speed:           3.0,
            waypoint_reach:       0.1,
            base_search_radius:   4.0,
            max_search_radius:    10.0,
            search_radius_growth: 1.0,
            wait_backoff_secs:    1.0,
            roam_radius:          3.0,
            flee_secs:            2.0,
            flee_distance:        3.0,
        }
    }
}

// ── AdversaryParams ───────────────────────────────────────────────────────────

/// Parameters that only adversaries use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdversaryParams {
    /// Targets are only considered within this radius.
    pub vision_radius: f64,
    /// An elimination is possible once the target is this close.
    pub kill_range: f64,
    /// The elimination is aborted if another eligible agent is this close to
    /// the target.
    pub safety_radius: f64,
    /// Cooldown before the first elimination.
    pub initial_kill_cooldown: f64,
    /// Cooldown after every elimination.
    pub kill_cooldown: f64,
    /// Seconds between target scans while not pursuing.  Adversaries scan
    /// whatever they are doing, except while holding a station.
    pub scan_interval: f64,
    /// Probability that a task attempt is faked.
    pub fake_task_chance: f64,
    /// A faked task lasts `task_duration × U(min, max)`.
    pub fake_min_factor: f64,
    pub fake_max_factor: f64,
}

impl Default for AdversaryParams {
    fn default() -> Self {
        Self {
            vision_radius:         4.0,
            kill_range:            1.5,
            safety_radius:         2.0,
            initial_kill_cooldown: 15.0,
            kill_cooldown:         10.0,
            scan_interval:         2.0,
            fake_task_chance:      0.7,
            fake_min_factor:       0.5,
            fake_max_factor:       1.5,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seconds per tick.
    pub tick_seconds: f64,

    /// `Sim::run` stops after this many ticks even without a winner.
    pub max_ticks: u64,

    /// Number of non-adversary agents.
    pub crewmates: usize,

    /// Number of adversaries.
    pub adversaries: usize,

    /// Adversaries win once the alive crewmate count is at or below this.
    pub adversary_win_threshold: usize,

    /// Task duration for stations that do not specify their own.
    pub task_duration: f64,

    /// Agents within this radius of an elimination witness it.
    pub witness_radius: f64,

    pub agent: AgentParams,

    pub adversary: AdversaryParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            tick_seconds:            0.02,
            max_ticks:               30_000,
            crewmates:               8,
            adversaries:             2,
            adversary_win_threshold: 0,
            task_duration:           3.0,
            witness_radius:          4.0,
            agent:                   AgentParams::default(),
            adversary:               AdversaryParams::default(),
        }
    }
}

impl SimConfig {
    /// Total agent count across both roles.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.crewmates + self.adversaries
    }

    /// Reject configurations the simulation cannot start from.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f64) -> CoreResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be positive, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> CoreResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be non-negative, got {v}")))
            }
        }

        positive("tick_seconds", self.tick_seconds)?;
        positive("task_duration", self.task_duration)?;
        non_negative("witness_radius", self.witness_radius)?;
        if self.crewmates == 0 {
            return Err(CoreError::Config("at least one crewmate is required".into()));
        }
        if self.adversary_win_threshold >= self.crewmates {
            return Err(CoreError::Config(format!(
                "adversary_win_threshold ({}) must be below the crewmate count ({})",
                self.adversary_win_threshold, self.crewmates
            )));
        }

        let a = &self.agent;
        positive("agent.move_speed", a.move_speed)?;
        positive("agent.waypoint_reach", a.waypoint_reach)?;
        non_negative("agent.base_search_radius", a.base_search_radius)?;
        non_negative("agent.search_radius_growth", a.search_radius_growth)?;
        positive("agent.wait_backoff_secs", a.wait_backoff_secs)?;
        non_negative("agent.roam_radius", a.roam_radius)?;
        non_negative("agent.flee_secs", a.flee_secs)?;
        non_negative("agent.flee_distance", a.flee_distance)?;
        if a.max_search_radius < a.base_search_radius {
            return Err(CoreError::Config(format!(
                "agent.max_search_radius ({}) is below base_search_radius ({})",
                a.max_search_radius, a.base_search_radius
            )));
        }

        let adv = &self.adversary;
        non_negative("adversary.vision_radius", adv.vision_radius)?;
        non_negative("adversary.kill_range", adv.kill_range)?;
        non_negative("adversary.safety_radius", adv.safety_radius)?;
        non_negative("adversary.initial_kill_cooldown", adv.initial_kill_cooldown)?;
        non_negative("adversary.kill_cooldown", adv.kill_cooldown)?;
        non_negative("adversary.scan_interval", adv.scan_interval)?;
        if !(0.0..=1.0).contains(&adv.fake_task_chance) {
            return Err(CoreError::Config(format!(
                "adversary.fake_task_chance must be within [0, 1], got {}",
                adv.fake_task_chance
            )));
        }
        non_negative("adversary.fake_min_factor", adv.fake_min_factor)?;
        if adv.fake_max_factor < adv.fake_min_factor {
            return Err(CoreError::Config(
                "adversary.fake_max_factor is below fake_min_factor".into(),
            ));
        }
        Ok(())
    }
}
