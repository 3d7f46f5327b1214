//! `cs-grid` — static walkability grid and A* pathfinding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`grid`]       | `GridSpec`, `GridCell`, `Grid`                          |
//! | [`pathfinder`] | `Pathfinder` trait, `Path`, `CellRoute`, `AStarPathfinder` |
//! | [`error`]      | `GridError`, `GridResult<T>`                            |
//!
//! The grid is built once from a caller-supplied obstacle predicate and is
//! immutable afterwards, so any number of readers may share it.  Search state
//! lives in a scratch buffer owned by a single `find_path` call and is never
//! written back into the grid.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridSpec`.             |

pub mod error;
pub mod grid;
pub mod pathfinder;


pub use error::{GridError, GridResult};
pub use grid::{Grid, GridCell, GridSpec};
pub use pathfinder::{AStarPathfinder, CellRoute, Path, Pathfinder, octile_distance};
