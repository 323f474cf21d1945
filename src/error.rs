use thiserror::Error;

/// Errors raised when a record would enter an invalid state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid requirements: {0}")]
    InvalidRequirements(String),

    #[error("Port allocation mismatch: {0}")]
    PortAllocationMismatch(String),

    #[error("Unresolved job reference: {0}")]
    UnresolvedReference(String),

    #[error("Unknown job status: {0:?}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
