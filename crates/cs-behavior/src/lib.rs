//! `cs-behavior` — agent behavior model trait and the default station behavior.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum (`Eliminate`, `TaskCompleted`, `TaskFaked`)       |
//! | [`context`] | `StepContext<'a>` — the world as seen by one agent's step       |
//! | [`model`]   | `BehaviorModel` trait, `Witnessed`                              |
//! | [`station`] | `StationBehavior`, `RoleProfile`, `TaskPolicy`                  |
//! | [`noop`]    | `NoopBehavior` — placeholder that never acts                    |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The orchestrator in cs-sim steps agents strictly one after another:
//!
//! 1. Move the agent's state out of the store into an `Actor`.
//! 2. Call `BehaviorModel::step` with a `StepContext` holding the grid, the
//!    pathfinder, the station pool (mutable) and every other agent (shared).
//! 3. Write the actor back and apply the returned intents, including any
//!    elimination and its witness fan-out.
//!
//! Because each agent's full step completes before the next begins, a
//! station test-then-occupy sequence can never interleave with another
//! agent's, and the first agent in ID order wins every race.

pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod station;


pub use context::StepContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::{BehaviorModel, Witnessed};
pub use noop::NoopBehavior;
pub use station::{RoleProfile, StationBehavior, TaskPolicy};
