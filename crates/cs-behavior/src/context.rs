//! Shared simulation state passed to every behavior callback.

use cs_agent::AgentStore;
use cs_core::Tick;
use cs_grid::{Grid, Pathfinder};
use cs_station::StationPool;

/// The world as seen by one agent's step.
///
/// Built by the orchestrator for each step.  `agents` holds every *other*
/// agent's current state (the stepping agent's own state has been moved out
/// into an [`Actor`][cs_agent::Actor]); `stations` is mutable because
/// occupying, advancing and releasing stations happens inside the step.
pub struct StepContext<'a> {
    /// Tick being processed.
    pub tick: Tick,

    /// Seconds covered by this tick.
    pub dt: f64,

    pub grid: &'a Grid,

    pub pathfinder: &'a dyn Pathfinder,

    pub stations: &'a mut StationPool,

    pub agents: &'a AgentStore,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(
        tick:       Tick,
        dt:         f64,
        grid:       &'a Grid,
        pathfinder: &'a dyn Pathfinder,
        stations:   &'a mut StationPool,
        agents:     &'a AgentStore,
    ) -> Self {
        Self { tick, dt, grid, pathfinder, stations, agents }
    }
}
