//! Agent intents: side effects a step asks the orchestrator to carry out.

use cs_core::{AgentId, StationId, Vec2};

/// Something the orchestrator must act on after an agent's step.
///
/// Station occupancy and movement are applied directly by the behavior
/// through [`StepContext`][crate::StepContext]; intents cover what crosses
/// agent boundaries (eliminations) or feeds the statistics layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Remove `victim` from play.  `at` is the elimination site used for the
    /// witness fan-out.
    Eliminate {
        victim: AgentId,
        at:     Vec2,
    },

    /// The stepping agent finished `station` for real.
    TaskCompleted { station: StationId },

    /// The stepping agent released `station` after pretending to work on it.
    TaskFaked { station: StationId },
}
