//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where a core validation failure can bubble up through them.

use thiserror::Error;

use crate::{AgentId, StationId};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
