use sf_core::CoreError;
use sf_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid swarm configuration: {0}")]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type SimResult<T> = Result<T, SimError>;
