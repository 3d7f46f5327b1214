//! Grid-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell radius must be positive, got {0}")]
    InvalidCellRadius(f64),

    #[error("world size {width} x {height} holds no cells at diameter {diameter}")]
    EmptyGrid {
        width:    f64,
        height:   f64,
        diameter: f64,
    },
}

pub type GridResult<T> = Result<T, GridError>;
