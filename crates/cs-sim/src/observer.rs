//! Simulation observer trait for progress reporting and data collection.

use cs_core::{AgentId, Side, StationId, Tick};

use crate::{EliminationEvent, SimulationStats};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &SimulationStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} crewmates alive", stats.tick, stats.alive_crewmates);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each processed tick, before any agent
    /// steps.  Not called while the simulation is frozen.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each processed tick with the recomputed counts.
    fn on_tick_end(&mut self, _stats: &SimulationStats) {}

    /// An agent finished a real task at `station`.
    fn on_task_completed(&mut self, _tick: Tick, _agent: AgentId, _station: StationId) {}

    /// An agent was eliminated, after its station was released and every
    /// witness was notified.
    fn on_elimination(&mut self, _event: &EliminationEvent) {}

    /// A side won during `tick`.  Called exactly once per run.
    fn on_game_over(&mut self, _tick: Tick, _winner: Side) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns.
    fn on_sim_end(&mut self, _stats: &SimulationStats) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
