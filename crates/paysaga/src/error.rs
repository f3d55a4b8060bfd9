use thiserror::Error;

use paysaga_core::{ApiError, ConfigError};

/// Error from a failed compensation action.
///
/// Surfaced only inside the compensation pass, where it is logged and
/// swallowed; the original caller never observes it.
#[derive(Debug, Error)]
#[error("compensation failed: {description}")]
pub struct CompensationError {
    /// Description of what the compensation was trying to undo.
    pub description: String,
    /// The underlying API failure.
    #[source]
    pub source: ApiError,
}

/// Error from transaction execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransactionError {
    /// The API configuration is unusable; raised at construction.
    #[error("payments API is not configured")]
    Configuration(#[from] ConfigError),

    /// An operation was attempted on a committed or finished transaction,
    /// or a second compensation pass was requested.
    #[error("invalid transaction state: {0}")]
    InvalidState(&'static str),

    /// A forward operation failed. All registered compensations have
    /// already run by the time this is returned.
    #[error("forward operation failed")]
    Operation(#[source] ApiError),
}
