//! `StationBehavior` — the station-contention state machine for both roles.
//!
//! # Role table
//!
//! There is one state machine.  What differs between crewmates and
//! adversaries is looked up in a [`RoleProfile`]:
//!
//! | Role        | flees on witness | hunts | task policy                   |
//! |-------------|------------------|-------|-------------------------------|
//! | `Crewmate`  | yes              | no    | `AlwaysReal`                  |
//! | `Adversary` | no               | yes   | `MayFake` (chance, factor)    |
//!
//! # Transitions
//!
//! ```text
//! Idle ──station found, path ok──▶ Traveling ──arrive, occupy ok──▶ PerformingTask
//!  │  ╲                               │ occupy lost                     │ done / faked
//!  │   ╲ none / unreachable           ▼                                 ▼
//!  │    ╰──────────────▶ Waiting ──timer──▶ Idle ◀──────────────────────╯
//!  │
//!  ╰─(hunter, cooldown 0, scan due, target seen)─▶ Pursuing ──in range, safe──▶ Eliminate + Fleeing
//!                                                  │ in range, guarded
//!                                                  ╰──────────────▶ Waiting
//!
//! witness (flees_on_witness) : any ──release held station──▶ Fleeing ──timer──▶ Idle
//! ```

use cs_agent::{Actor, AgentMind, BehaviorState, Movement, TaskMode};
use cs_core::{AdversaryParams, AgentId, AgentParams, AgentRng, Role, SimConfig, StationId, Vec2};
use cs_grid::Path;

use crate::{BehaviorError, BehaviorModel, BehaviorResult, Intent, StepContext, Witnessed};

// ── Role profiles ─────────────────────────────────────────────────────────────

/// Whether a task attempt does real work.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TaskPolicy {
    AlwaysReal,
    /// Fake with probability `chance`; a fake lasts
    /// `task_duration × U(min_factor, max_factor)` seconds.
    MayFake {
        chance:     f64,
        min_factor: f64,
        max_factor: f64,
    },
}

/// Role-specific switches consulted by the shared state machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoleProfile {
    pub flees_on_witness: bool,
    pub hunts:            bool,
    pub task_policy:      TaskPolicy,
}

impl RoleProfile {
    pub fn crewmate() -> Self {
        Self {
            flees_on_witness: true,
            hunts:            false,
            task_policy:      TaskPolicy::AlwaysReal,
        }
    }

    pub fn adversary(params: &AdversaryParams) -> Self {
        Self {
            flees_on_witness: false,
            hunts:            true,
            task_policy:      TaskPolicy::MayFake {
                chance:     params.fake_task_chance,
                min_factor: params.fake_min_factor,
                max_factor: params.fake_max_factor,
            },
        }
    }
}

// ── StationBehavior ───────────────────────────────────────────────────────────

/// The default [`BehaviorModel`]: seek stations, work or fake them, hunt,
/// flee.
pub struct StationBehavior {
    agent:     AgentParams,
    adversary: AdversaryParams,
    crewmate_profile:  RoleProfile,
    adversary_profile: RoleProfile,
}

impl StationBehavior {
    /// Build from a validated configuration.
    pub fn from_config(config: &SimConfig) -> BehaviorResult<Self> {
        config
            .validate()
            .map_err(|e| BehaviorError::Config(e.to_string()))?;
        Ok(Self {
            agent:             config.agent.clone(),
            adversary:         config.adversary.clone(),
            crewmate_profile:  RoleProfile::crewmate(),
            adversary_profile: RoleProfile::adversary(&config.adversary),
        })
    }

    /// Replace the profile used for `role`.
    pub fn with_profile(mut self, role: Role, profile: RoleProfile) -> BehaviorResult<Self> {
        if let TaskPolicy::MayFake { chance, min_factor, max_factor } = profile.task_policy {
            if !(0.0..=1.0).contains(&chance) || min_factor < 0.0 || max_factor < min_factor {
                return Err(BehaviorError::Config(format!(
                    "invalid fake-task policy for {role}: chance {chance}, factors {min_factor}..{max_factor}"
                )));
            }
        }
        match role {
            Role::Crewmate  => self.crewmate_profile = profile,
            Role::Adversary => self.adversary_profile = profile,
        }
        Ok(self)
    }

    pub fn profile(&self, role: Role) -> &RoleProfile {
        match role {
            Role::Crewmate  => &self.crewmate_profile,
            Role::Adversary => &self.adversary_profile,
        }
    }

    #[inline]
    fn step_budget(&self, ctx: &StepContext<'_>) -> f64 {
        self.agent.move_speed * ctx.dt
    }

    // ── Idle / Waiting ────────────────────────────────────────────────────

    fn seek_station(&self, actor: &mut Actor, ctx: &mut StepContext<'_>, rng: &mut AgentRng) {
        let radius = actor.mind.search_radius;
        let Some(station) = ctx.stations.nearest_free(actor.position, radius) else {
            actor.mind.search_radius = (radius
                + self.agent.search_radius_growth * self.agent.wait_backoff_secs)
                .min(self.agent.max_search_radius);
            tracing::trace!(agent = %actor.id, radius, "no free station in range");
            self.start_waiting(actor, ctx, rng);
            return;
        };
        actor.mind.search_radius = self.agent.base_search_radius;

        let Some(target) = ctx.stations.get(station).map(|s| s.position()) else {
            self.start_waiting(actor, ctx, rng);
            return;
        };
        let path = ctx.pathfinder.find_path(ctx.grid, actor.position, target);
        if path.is_empty() {
            tracing::trace!(agent = %actor.id, %station, "station unreachable");
            self.start_waiting(actor, ctx, rng);
            return;
        }
        actor.mind.set_path(path);
        actor.mind.state = BehaviorState::Traveling { station };
    }

    /// Back off for `wait_backoff_secs`, roaming towards a random nearby
    /// point meanwhile.
    fn start_waiting(&self, actor: &mut Actor, ctx: &mut StepContext<'_>, rng: &mut AgentRng) {
        let path = if self.agent.roam_radius > 0.0 {
            let offset = rng.unit_direction() * rng.uniform(0.0, self.agent.roam_radius);
            ctx.pathfinder.find_path(ctx.grid, actor.position, actor.position + offset)
        } else {
            Path::empty()
        };
        actor.mind.set_path(path);
        actor.mind.state = BehaviorState::Waiting { remaining: self.agent.wait_backoff_secs };
    }

    fn wait(&self, actor: &mut Actor, remaining: f64, ctx: &StepContext<'_>) {
        let budget = self.step_budget(ctx);
        actor.mind.follow_path(&mut actor.position, budget, self.agent.waypoint_reach);
        let remaining = remaining - ctx.dt;
        if remaining <= 0.0 {
            go_idle(&mut actor.mind);
        } else {
            actor.mind.state = BehaviorState::Waiting { remaining };
        }
    }

    // ── Traveling / PerformingTask ────────────────────────────────────────

    fn travel(
        &self,
        actor:   &mut Actor,
        station: StationId,
        ctx:     &mut StepContext<'_>,
        rng:     &mut AgentRng,
    ) {
        let budget = self.step_budget(ctx);
        if actor.mind.follow_path(&mut actor.position, budget, self.agent.waypoint_reach)
            == Movement::EnRoute
        {
            return;
        }

        let policy = self.profile(actor.role).task_policy;
        let Some(st) = ctx.stations.get_mut(station) else {
            go_idle(&mut actor.mind);
            return;
        };
        if st.try_occupy(actor.id) {
            let mode = choose_mode(policy, st.task_duration(), rng);
            actor.mind.clear_path();
            actor.mind.state = BehaviorState::PerformingTask { station, mode };
        } else {
            tracing::trace!(agent = %actor.id, %station, "station taken before arrival");
            go_idle(&mut actor.mind);
        }
    }

    fn work(
        &self,
        actor:   &mut Actor,
        station: StationId,
        mode:    TaskMode,
        ctx:     &mut StepContext<'_>,
    ) -> Option<Intent> {
        let Some(st) = ctx.stations.get_mut(station) else {
            go_idle(&mut actor.mind);
            return None;
        };
        if st.occupant() != Some(actor.id) {
            go_idle(&mut actor.mind);
            return None;
        }
        match mode {
            TaskMode::Real => {
                if st.advance(ctx.dt) {
                    go_idle(&mut actor.mind);
                    return Some(Intent::TaskCompleted { station });
                }
                None
            }
            TaskMode::Fake { remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining <= 0.0 {
                    st.force_release();
                    go_idle(&mut actor.mind);
                    return Some(Intent::TaskFaked { station });
                }
                actor.mind.state = BehaviorState::PerformingTask {
                    station,
                    mode: TaskMode::Fake { remaining },
                };
                None
            }
        }
    }

    // ── Fleeing ───────────────────────────────────────────────────────────

    /// Run towards a point `flee_distance` directly away from `threat`.
    /// An unreachable flee point leaves the agent fleeing in place.
    fn start_flee(&self, actor: &mut Actor, threat: Vec2, ctx: &StepContext<'_>, rng: &mut AgentRng) {
        let away = (actor.position - threat)
            .normalized()
            .unwrap_or_else(|| rng.unit_direction());
        let goal = actor.position + away * self.agent.flee_distance;
        let path = ctx.pathfinder.find_path(ctx.grid, actor.position, goal);
        actor.mind.set_path(path);
        actor.mind.state = BehaviorState::Fleeing { remaining: self.agent.flee_secs };
    }

    fn flee(&self, actor: &mut Actor, remaining: f64, ctx: &StepContext<'_>) {
        let budget = self.step_budget(ctx);
        actor.mind.follow_path(&mut actor.position, budget, self.agent.waypoint_reach);
        let remaining = remaining - ctx.dt;
        if remaining <= 0.0 {
            go_idle(&mut actor.mind);
        } else {
            actor.mind.state = BehaviorState::Fleeing { remaining };
        }
    }

    // ── Hunting ───────────────────────────────────────────────────────────

    /// Start or continue a pursuit.  Returns `None` when the step should
    /// fall through to the ordinary state handling.
    ///
    /// A pursuing adversary re-picks the nearest crewmate in vision every
    /// tick.  Otherwise it scans every `scan_interval` seconds in any state
    /// but `PerformingTask`.  A target in range with another crewmate close
    /// by is dropped, and the adversary roams until its next scan.
    fn hunt(
        &self,
        actor: &mut Actor,
        ctx:   &mut StepContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<Vec<Intent>> {
        let pursuing = matches!(actor.mind.state, BehaviorState::Pursuing { .. });
        if actor.mind.kill_cooldown > 0.0 {
            if pursuing {
                go_idle(&mut actor.mind);
            }
            return None;
        }
        if !pursuing {
            let can_scan = matches!(
                actor.mind.state,
                BehaviorState::Idle
                    | BehaviorState::Traveling { .. }
                    | BehaviorState::Waiting { .. }
                    | BehaviorState::Fleeing { .. }
            );
            if !can_scan || actor.mind.scan_timer > 0.0 {
                return None;
            }
            actor.mind.scan_timer = self.adversary.scan_interval;
        }

        let Some(target) = ctx.agents.nearest_alive(
            actor.position,
            self.adversary.vision_radius,
            Role::Crewmate,
            actor.id,
        ) else {
            if pursuing {
                go_idle(&mut actor.mind);
            }
            return None;
        };
        if actor.mind.state != (BehaviorState::Pursuing { target }) {
            tracing::trace!(agent = %actor.id, %target, "pursuing");
            actor.mind.clear_path();
            actor.mind.state = BehaviorState::Pursuing { target };
        }

        let target_pos = ctx.agents.position[target.index()];
        if actor.position.distance(target_pos) <= self.adversary.kill_range {
            if self.unwitnessed(target, target_pos, ctx) {
                actor.mind.kill_cooldown = self.adversary.kill_cooldown;
                self.start_flee(actor, target_pos, ctx, rng);
                return Some(vec![Intent::Eliminate { victim: target, at: target_pos }]);
            }
            tracing::trace!(agent = %actor.id, %target, "target guarded, breaking off");
            actor.mind.scan_timer = self.adversary.scan_interval;
            self.start_waiting(actor, ctx, rng);
            return Some(vec![]);
        }

        self.chase(actor, target_pos, ctx, rng);
        Some(vec![])
    }

    /// `true` if no living crewmate other than `target` is within the safety
    /// radius of `target_pos`.
    fn unwitnessed(&self, target: AgentId, target_pos: Vec2, ctx: &StepContext<'_>) -> bool {
        !ctx.agents
            .alive_within(target_pos, self.adversary.safety_radius, Role::Crewmate)
            .any(|a| a != target)
    }

    fn chase(&self, actor: &mut Actor, target_pos: Vec2, ctx: &mut StepContext<'_>, rng: &mut AgentRng) {
        let goal = ctx.grid.cell(ctx.grid.cell_at(target_pos)).world_position;
        if !actor.mind.has_path() || actor.mind.path.last() != Some(goal) {
            let path = ctx.pathfinder.find_path(ctx.grid, actor.position, target_pos);
            if path.is_empty() {
                self.start_waiting(actor, ctx, rng);
                return;
            }
            actor.mind.set_path(path);
        }
        let budget = self.step_budget(ctx);
        actor.mind.follow_path(&mut actor.position, budget, self.agent.waypoint_reach);
    }
}

impl BehaviorModel for StationBehavior {
    fn initial_mind(&self, role: Role) -> AgentMind {
        let cooldown = if self.profile(role).hunts {
            self.adversary.initial_kill_cooldown
        } else {
            0.0
        };
        AgentMind::new(self.agent.base_search_radius, cooldown)
    }

    fn step(
        &self,
        actor: &mut Actor,
        ctx:   &mut StepContext<'_>,
        rng:   &mut AgentRng,
    ) -> Vec<Intent> {
        if actor.mind.is_dead() {
            return vec![];
        }

        if self.profile(actor.role).hunts {
            actor.mind.kill_cooldown = (actor.mind.kill_cooldown - ctx.dt).max(0.0);
            actor.mind.scan_timer = (actor.mind.scan_timer - ctx.dt).max(0.0);
            if let Some(intents) = self.hunt(actor, ctx, rng) {
                return intents;
            }
        }

        match actor.mind.state {
            BehaviorState::Idle => self.seek_station(actor, ctx, rng),
            BehaviorState::Waiting { remaining } => self.wait(actor, remaining, ctx),
            BehaviorState::Traveling { station } => self.travel(actor, station, ctx, rng),
            BehaviorState::PerformingTask { station, mode } => {
                return self.work(actor, station, mode, ctx).into_iter().collect();
            }
            BehaviorState::Fleeing { remaining } => self.flee(actor, remaining, ctx),
            // Only reachable for a role whose profile stopped hunting.
            BehaviorState::Pursuing { .. } => go_idle(&mut actor.mind),
            BehaviorState::Dead => {}
        }
        vec![]
    }

    fn on_witness(
        &self,
        actor: &mut Actor,
        event: &Witnessed,
        ctx:   &mut StepContext<'_>,
        rng:   &mut AgentRng,
    ) {
        if actor.mind.is_dead() || !self.profile(actor.role).flees_on_witness {
            return;
        }
        if let BehaviorState::PerformingTask { station, .. } = actor.mind.state {
            if let Some(st) = ctx.stations.get_mut(station) {
                if st.occupant() == Some(actor.id) {
                    st.force_release();
                }
            }
        }
        tracing::trace!(agent = %actor.id, victim = %event.victim, "witnessed elimination, fleeing");
        self.start_flee(actor, event.at, ctx, rng);
    }
}

fn go_idle(mind: &mut AgentMind) {
    mind.clear_path();
    mind.state = BehaviorState::Idle;
}

fn choose_mode(policy: TaskPolicy, task_duration: f64, rng: &mut AgentRng) -> TaskMode {
    match policy {
        TaskPolicy::AlwaysReal => TaskMode::Real,
        TaskPolicy::MayFake { chance, min_factor, max_factor } => {
            if rng.gen_bool(chance) {
                TaskMode::Fake { remaining: task_duration * rng.uniform(min_factor, max_factor) }
            } else {
                TaskMode::Real
            }
        }
    }
}
