//! The `BehaviorModel` trait, the main extension point for agent logic.

use cs_agent::{Actor, AgentMind};
use cs_core::{AgentId, AgentRng, Role, Vec2};

use crate::{Intent, StepContext};

/// An elimination seen by a nearby agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Witnessed {
    pub victim: AgentId,
    /// The eliminating agent, when known.
    pub killer: Option<AgentId>,
    /// Where it happened.
    pub at:     Vec2,
}

/// Pluggable agent behavior.
///
/// Only [`step`][Self::step] is required.  The orchestrator calls it exactly
/// once per living agent per tick, in ascending `AgentId` order, and finishes
/// one agent's step (including its intents) before starting the next.
///
/// Per-agent state lives in the [`Actor`]; the model itself holds only
/// configuration, so it is `Send + Sync`.
pub trait BehaviorModel: Send + Sync + 'static {
    /// State a freshly spawned agent of `role` starts with.
    fn initial_mind(&self, _role: Role) -> AgentMind {
        AgentMind::default()
    }

    /// Advance `actor` by `ctx.dt` seconds.
    fn step(
        &self,
        actor: &mut Actor,
        ctx:   &mut StepContext<'_>,
        rng:   &mut AgentRng,
    ) -> Vec<Intent>;

    /// Called for every living agent within the witness radius of an
    /// elimination, except the victim and the killer.
    ///
    /// Default: ignore it.
    fn on_witness(
        &self,
        _actor: &mut Actor,
        _event: &Witnessed,
        _ctx:   &mut StepContext<'_>,
        _rng:   &mut AgentRng,
    ) {
    }
}
