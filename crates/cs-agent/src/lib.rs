//! `cs-agent` — Structure-of-Arrays agent storage for the `crewsim` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`mind`]    | `AgentMind`, `BehaviorState`, `TaskMode`                     |
//! | [`motion`]  | Waypoint following (`AgentMind::follow_path`, `Movement`)    |
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs`, `Actor`              |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                    |
//!
//! # Stepping one agent
//!
//! The orchestrator advances agents one at a time.  For each, it moves the
//! agent's mutable state out of the store into an [`Actor`], hands the actor
//! to the behavior model together with a shared view of the rest of the
//! store, and writes the actor back afterwards.  The behavior therefore sees
//! every other agent's latest state without aliasing its own.

pub mod builder;
pub mod mind;
pub mod motion;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use mind::{AgentMind, BehaviorState, TaskMode};
pub use motion::Movement;
pub use store::{Actor, AgentRngs, AgentStore};
