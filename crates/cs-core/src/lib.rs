//! `cs-core` — foundational types for the `crewsim` station-contention simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and only `rand` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `StationId`, `CellId`                          |
//! | [`geo`]    | `Vec2` world-space vector                                 |
//! | [`time`]   | `Tick`, `SimClock`                                        |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (host-level)             |
//! | [`role`]   | `Role`, `Side`                                            |
//! | [`config`] | `SimConfig`, `AgentParams`, `AdversaryParams`             |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod role;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AdversaryParams, AgentParams, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Vec2;
pub use ids::{AgentId, CellId, StationId};
pub use rng::{AgentRng, SimRng};
pub use role::{Role, Side};
pub use time::{SimClock, Tick};
