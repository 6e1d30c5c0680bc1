//! Typed transaction records.
//!
//! Records are transient value objects. They are built in memory by the
//! fixture generators and converted to JSON only at the store boundary.

pub mod error;
pub mod recurring;
pub mod transaction;
pub mod types;

pub use error::RecordError;
pub use recurring::RecurringTransactionRecord;
pub use transaction::TransactionRecord;
pub use types::{DEFAULT_ACCOUNT_TYPE, DEFAULT_CATEGORY_ID, Frequency, TransactionKind};
