use crate::branch::BranchError;
use crate::config::ConfigError;
use resource_slice::{ActionError, GateError, TransportError};

/// Everything the console can fail with outside a single action's outcome.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Branch(#[from] BranchError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("A store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
