//! Crate-wide error type

use thiserror::Error;

pub type MinterResult<T> = Result<T, MinterError>;

#[derive(Debug, Error)]
pub enum MinterError {
    /// Entity lookup miss. Carries the entity label ("Ordinal", "Transaction", ...).
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("You do not own this ordinal")]
    NotOwner,

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("chain: {0}")]
    Chain(String),

    #[error("restart required: {0}")]
    RestartRequired(&'static str),
}

impl MinterError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::Invalid(msg.into()) }
}

impl From<anyhow::Error> for MinterError {
    fn from(e: anyhow::Error) -> Self { Self::Chain(e.to_string()) }
}
