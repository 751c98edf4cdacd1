use std::time::Duration;

use super::engine_service::EngineError;

/// Errors surfaced by the generator and the cover solvers
#[derive(Debug, thiserror::Error)]
pub enum SetCoverError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Covering program is infeasible: {0}")]
    Infeasible(String),

    #[error("Randomized solver did not cover the universe within {draws} draws")]
    NonTermination { draws: usize },

    #[error("Exact solver exceeded its time limit ({limit:?})")]
    TimedOut { limit: Option<Duration> },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, SetCoverError>;
