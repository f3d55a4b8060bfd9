use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tracing::{debug, error, info};

use paysaga_core::ApiError;

use crate::error::CompensationError;

type CompensationFuture = Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send>>;

/// A described, one-shot inverse action.
///
/// Built when a forward operation succeeds and stored until the
/// transaction either commits (the action is discarded) or rolls back
/// (the action runs exactly once).
pub struct Compensation {
    description: String,
    action: Option<CompensationFuture>,
}

impl Compensation {
    /// A compensation that undoes a forward call.
    #[must_use]
    pub fn new<F>(description: impl Into<String>, action: F) -> Self
    where
        F: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        Self {
            description: description.into(),
            action: Some(Box::pin(action)),
        }
    }

    /// A compensation that does nothing when run.
    ///
    /// Used for result kinds with no meaningful inverse.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            description: "no-op".to_string(),
            action: None,
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.action.is_none()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the inverse action, logging intent and outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CompensationError`] if the inverse call fails. The
    /// compensation pass logs this and continues with the next entry.
    pub(crate) async fn run(self) -> Result<(), CompensationError> {
        let Some(action) = self.action else {
            debug!("skipping no-op compensation");
            return Ok(());
        };

        info!(compensation = %self.description, "undoing operation");
        match action.await {
            Ok(()) => {
                info!(compensation = %self.description, "compensation complete");
                Ok(())
            }
            Err(source) => {
                error!(compensation = %self.description, error = %source, "compensation failed");
                Err(CompensationError {
                    description: self.description,
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compensation")
            .field("description", &self.description)
            .field("is_noop", &self.is_noop())
            .finish()
    }
}
