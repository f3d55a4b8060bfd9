//! Compensating-transaction coordinator for payments API calls.
//!
//! A [`Transaction`] runs a sequence of non-atomic remote calls as if
//! they were one atomic unit: every successful forward call registers the
//! inverse action for the value it produced, and the first failure
//! replays all registered inverses in reverse order before the error
//! reaches the caller. Transactions that end without an explicit
//! [`Transaction::commit`] roll back on finalization.

mod compensation;
mod error;
mod reversible;
mod transaction;

pub use compensation::Compensation;
pub use error::{CompensationError, TransactionError};
pub use reversible::Reversible;
pub use transaction::{Transaction, scope};
