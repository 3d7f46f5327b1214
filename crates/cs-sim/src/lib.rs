//! `cs-sim` — tick loop orchestrator for the `crewsim` simulator.
//!
//! # Tick loop
//!
//! ```text
//! while no winner:
//!   ① Agents  — for each living agent in ascending AgentId order:
//!                 take actor → BehaviorModel::step → restore → apply intents
//!                   Eliminate{victim}   → release station, mark dead,
//!                                         BehaviorModel::on_witness fan-out
//!                   TaskCompleted{..}   → per-agent counter, observer hook
//!                   TaskFaked{..}       → log only
//!   ② Counts  — recompute SimulationStats from agents and stations.
//!   ③ Win     — alive crewmates ≤ threshold → Adversaries;
//!                else all stations Completed → Crew.
//!                A win freezes the simulation until reset().
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_behavior::StationBehavior;
//! use cs_core::SimConfig;
//! use cs_grid::AStarPathfinder;
//! use cs_sim::{NoopObserver, SimBuilder};
//!
//! let behavior = StationBehavior::from_config(&config)?;
//! let mut sim = SimBuilder::new(config, grid, behavior, AStarPathfinder)
//!     .stations(stations)
//!     .spawns(spawns)
//!     .build()?;
//! let stats = sim.run(&mut NoopObserver);
//! println!("winner: {:?}", stats.winner);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::{EliminationEvent, SimulationStats};
