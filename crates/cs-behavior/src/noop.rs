//! A no-op behavior model; agents never act.

use cs_agent::Actor;
use cs_core::AgentRng;

use crate::{BehaviorModel, Intent, StepContext};

/// A [`BehaviorModel`] that leaves every agent where it is.
///
/// Useful in tests that drive stations or eliminations by hand.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn step(
        &self,
        _actor: &mut Actor,
        _ctx:   &mut StepContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
