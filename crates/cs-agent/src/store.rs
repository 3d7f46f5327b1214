//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live outside the store so the orchestrator can hold `&AgentStore`
//! (read by behavior code looking at other agents) and `&mut AgentRng` (for
//! the agent being stepped) at the same time.

use cs_core::{AgentId, AgentRng, Role, Vec2};

use crate::AgentMind;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Actor ─────────────────────────────────────────────────────────────────────

/// One agent's mutable state, moved out of the store while it is stepped.
#[derive(Debug)]
pub struct Actor {
    pub id:       AgentId,
    pub role:     Role,
    pub position: Vec2,
    pub mind:     AgentMind,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them.  Registration order is the processing order.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub role: Vec<Role>,

    /// `false` once eliminated.  Dead agents are skipped by every query.
    pub alive: Vec<bool>,

    /// World position.
    pub position: Vec<Vec2>,

    pub mind: Vec<AgentMind>,

    /// Stations this agent has completed for real.
    pub tasks_completed: Vec<u32>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn role_of(&self, agent: AgentId) -> Role {
        self.role[agent.index()]
    }

    /// Number of agents with `role`.
    pub fn count_role(&self, role: Role) -> usize {
        self.role.iter().filter(|&&r| r == role).count()
    }

    /// Number of living agents with `role`.
    pub fn alive_count(&self, role: Role) -> usize {
        self.role
            .iter()
            .zip(&self.alive)
            .filter(|&(&r, &alive)| alive && r == role)
            .count()
    }

    // ── Proximity queries ─────────────────────────────────────────────────

    /// Living agents of `role` within `radius` of `at`, in ascending ID order.
    pub fn alive_within(&self, at: Vec2, radius: f64, role: Role) -> impl Iterator<Item = AgentId> + '_ {
        let r2 = radius * radius;
        self.agent_ids().filter(move |&a| {
            let i = a.index();
            self.alive[i] && self.role[i] == role && self.position[i].distance_sq(at) <= r2
        })
    }

    /// Nearest living agent of `role` within `radius` of `from`, skipping
    /// `exclude`.  Ties go to the lower ID.
    pub fn nearest_alive(
        &self,
        from:    Vec2,
        radius:  f64,
        role:    Role,
        exclude: AgentId,
    ) -> Option<AgentId> {
        let mut best: Option<(f64, AgentId)> = None;
        for a in self.alive_within(from, radius, role) {
            if a == exclude {
                continue;
            }
            let d = self.position[a.index()].distance_sq(from);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, a));
            }
        }
        best.map(|(_, a)| a)
    }

    // ── Actor hand-off ────────────────────────────────────────────────────

    /// Move `agent`'s mutable state out of the store.  The slot holds a
    /// default mind until [`restore`](Self::restore) is called.
    pub fn take_actor(&mut self, agent: AgentId) -> Actor {
        let i = agent.index();
        Actor {
            id:       agent,
            role:     self.role[i],
            position: self.position[i],
            mind:     std::mem::take(&mut self.mind[i]),
        }
    }

    /// Write an actor taken with [`take_actor`](Self::take_actor) back.
    pub fn restore(&mut self, actor: Actor) {
        let i = actor.id.index();
        self.position[i] = actor.position;
        self.mind[i] = actor.mind;
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(roles: Vec<Role>, positions: Vec<Vec2>) -> Self {
        let count = roles.len();
        Self {
            count,
            role:            roles,
            alive:           vec![true; count],
            position:        positions,
            mind:            vec![AgentMind::default(); count],
            tasks_completed: vec![0; count],
        }
    }
}
