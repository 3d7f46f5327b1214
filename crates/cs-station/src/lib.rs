//! `cs-station` — exclusive-use task stations for the `crewsim` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`station`] | `Station`, `StationState`, `StationSpec`              |
//! | [`pool`]    | `StationPool` (owning collection + R-tree index)      |
//!
//! # Mutual exclusion
//!
//! A station is `Occupied` by at most one agent at a time.  Every transition
//! goes through a `&mut Station` method, and the simulation loop steps one
//! agent at a time, so two agents racing for the same station are resolved
//! by processing order: the first `try_occupy` wins and later ones see
//! `false`.
//!
//! Stations refer to their occupant by `AgentId` only; they never own or
//! borrow agent state.

pub mod pool;
pub mod station;


pub use pool::StationPool;
pub use station::{Station, StationSpec, StationState};
