use std::future::Future;
use std::mem;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use paysaga_core::{ApiConfig, ApiError, PaymentsClient};

use crate::compensation::Compensation;
use crate::error::TransactionError;
use crate::reversible::Reversible;

/// A compensating transaction over a sequence of payments API calls.
///
/// Every successful forward operation registers the inverse action for
/// the value it produced. If a later operation fails, all registered
/// inverses run in reverse registration order (LIFO) before the original
/// error is returned. A transaction that is never [`commit`]ted rolls
/// back when [`finish`] runs.
///
/// The transaction is a single-owner object: all entry points take
/// `&mut self`, so concurrent use from several tasks requires an external
/// lock held by the caller.
///
/// [`commit`]: Transaction::commit
/// [`finish`]: Transaction::finish
pub struct Transaction {
    client: Arc<dyn PaymentsClient>,
    compensations: Vec<Compensation>,
    committed: bool,
    closed: bool,
}

impl Transaction {
    /// Open a transaction against the given client.
    ///
    /// Validates the configuration up front; an unusable configuration
    /// fails here with [`TransactionError::Configuration`] before any
    /// state is allocated.
    pub fn new(
        config: &ApiConfig,
        client: Arc<dyn PaymentsClient>,
    ) -> Result<Self, TransactionError> {
        config.validate()?;
        Ok(Self {
            client,
            compensations: Vec::new(),
            committed: false,
            closed: false,
        })
    }

    /// Run a forward operation and register the inverse of its result.
    ///
    /// On success the value's [`Reversible::compensation`] is appended to
    /// the rollback list and the value is returned. On failure every
    /// registered compensation runs to completion before the error comes
    /// back as [`TransactionError::Operation`].
    pub async fn execute<T, F, Fut>(&mut self, operation: F) -> Result<T, TransactionError>
    where
        T: Reversible,
        F: FnOnce(Arc<dyn PaymentsClient>) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.guard_open()?;
        match operation(Arc::clone(&self.client)).await {
            Ok(value) => {
                self.register(value.compensation(Arc::clone(&self.client)));
                Ok(value)
            }
            Err(error) => Err(self.operation_failed(error).await),
        }
    }

    /// Like [`execute`], for forward calls that may legitimately produce
    /// no result.
    ///
    /// `Ok(None)` registers nothing and logs a warning; everything else
    /// behaves exactly as [`execute`].
    ///
    /// [`execute`]: Transaction::execute
    pub async fn execute_optional<T, F, Fut>(
        &mut self,
        operation: F,
    ) -> Result<Option<T>, TransactionError>
    where
        T: Reversible,
        F: FnOnce(Arc<dyn PaymentsClient>) -> Fut,
        Fut: Future<Output = Result<Option<T>, ApiError>>,
    {
        self.guard_open()?;
        match operation(Arc::clone(&self.client)).await {
            Ok(Some(value)) => {
                self.register(value.compensation(Arc::clone(&self.client)));
                Ok(Some(value))
            }
            Ok(None) => {
                warn!(
                    kind = std::any::type_name::<T>(),
                    "forward operation returned no result, nothing to compensate"
                );
                Ok(None)
            }
            Err(error) => Err(self.operation_failed(error).await),
        }
    }

    /// Run a forward operation that produces no result.
    ///
    /// Never registers a compensation itself; reversible sub-steps of a
    /// composite operation must go through [`execute`] individually.
    /// Failure still triggers the full rollback of everything registered
    /// so far.
    ///
    /// [`execute`]: Transaction::execute
    pub async fn execute_unit<F, Fut>(&mut self, operation: F) -> Result<(), TransactionError>
    where
        F: FnOnce(Arc<dyn PaymentsClient>) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        self.guard_open()?;
        match operation(Arc::clone(&self.client)).await {
            Ok(()) => Ok(()),
            Err(error) => Err(self.operation_failed(error).await),
        }
    }

    /// Mark the transaction successful and discard pending compensations.
    ///
    /// After commit no further operations are accepted and [`finish`]
    /// becomes a no-op.
    ///
    /// [`finish`]: Transaction::finish
    pub fn commit(&mut self) -> Result<(), TransactionError> {
        self.guard_open()?;
        self.committed = true;
        self.closed = true;
        let discarded = self.compensations.len();
        self.compensations.clear();
        info!(discarded, "transaction committed");
        Ok(())
    }

    /// Finalize the transaction.
    ///
    /// Rolls back everything registered if the transaction is still open,
    /// then closes it. Idempotent: calling it on a closed transaction
    /// does nothing.
    pub async fn finish(&mut self) {
        if self.closed {
            return;
        }
        // commit() closes the transaction, so anything still open here
        // was never committed.
        warn!(
            pending = self.compensations.len(),
            "transaction finished without commit, rolling back"
        );
        if let Err(state) = self.compensate_all().await {
            error!(error = %state, "rollback did not run");
        }
    }

    /// Number of compensations currently registered.
    #[must_use]
    pub fn pending_compensations(&self) -> usize {
        self.compensations.len()
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn guard_open(&self) -> Result<(), TransactionError> {
        if self.committed || self.closed {
            let error = TransactionError::InvalidState(
                "cannot add operations to a committed or finished transaction",
            );
            error!(error = %error, "operation rejected");
            return Err(error);
        }
        Ok(())
    }

    fn register(&mut self, compensation: Compensation) {
        debug!(compensation = %compensation.description(), "registered compensation");
        self.compensations.push(compensation);
    }

    async fn operation_failed(&mut self, error: ApiError) -> TransactionError {
        error!(error = %error, "forward operation failed, rolling back transaction");
        if let Err(state) = self.compensate_all().await {
            error!(error = %state, "rollback did not run");
        }
        TransactionError::Operation(error)
    }

    /// Run every registered compensation, last-registered-first.
    ///
    /// Closes the transaction before the first inverse runs, so no new
    /// operation can observe a half-rolled-back state. A failing step is
    /// logged with its position in the pass and never stops the
    /// remaining steps.
    async fn compensate_all(&mut self) -> Result<(), TransactionError> {
        if self.closed {
            return Err(TransactionError::InvalidState(
                "compensation already ran for this transaction",
            ));
        }
        self.closed = true;

        let compensations = mem::take(&mut self.compensations);
        let total = compensations.len();
        info!(count = total, "rolling back transaction");

        for (position, compensation) in compensations.into_iter().rev().enumerate() {
            if let Err(failure) = compensation.run().await {
                error!(
                    step = position + 1,
                    total,
                    error = %failure,
                    "compensation step failed, continuing with remaining steps"
                );
            }
        }

        info!(count = total, "rollback complete");
        Ok(())
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.closed {
            warn!(
                pending = self.compensations.len(),
                "transaction dropped while open; compensations did not run (use finish or scope)"
            );
        }
    }
}

/// Run `body` inside a transaction whose finalization is guaranteed.
///
/// The transaction is opened, handed to `body`, and [`Transaction::finish`]ed
/// on every exit path before the body's result is returned. A body that
/// returns without committing rolls the transaction back.
pub async fn scope<T, F>(
    config: &ApiConfig,
    client: Arc<dyn PaymentsClient>,
    body: F,
) -> Result<T, TransactionError>
where
    F: AsyncFnOnce(&mut Transaction) -> Result<T, TransactionError>,
{
    let mut transaction = Transaction::new(config, client)?;
    let result = body(&mut transaction).await;
    transaction.finish().await;
    result
}
