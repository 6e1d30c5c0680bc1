//! Fixture core for Tallyguard.
//!
//! This crate contains pure fixture logic with ZERO network dependencies.
//! Test suites use it to build payloads for the hosted store and to check
//! what comes back.
//!
//! # Modules
//!
//! - `records` - Typed transaction and recurring transaction records
//! - `fixtures` - Random tokens, generators, bulk batches, and the factory
//! - `compare` - Tolerant one-directional record comparison
//! - `polling` - Bounded wait-for-condition helpers
//! - `dates` - Date ranges for date-bounded queries
//! - `summary` - Income, expense, and category totals

pub mod compare;
pub mod dates;
pub mod fixtures;
pub mod polling;
pub mod records;
pub mod summary;

mod numeric;

pub use compare::{
    ComparisonError, DEFAULT_EXCLUDED_FIELDS, assert_equivalent, assert_transaction_equals,
    compare_records, compare_values,
};
pub use fixtures::{
    HOUSEHOLD_PATTERNS, RecurringOverrides, SpendingPattern, TestDataFactory,
    TransactionOverrides, make_bulk_transactions, make_recurring_transaction, make_transaction,
    random_token,
};
pub use polling::{wait_for, wait_for_async};
pub use records::{Frequency, RecurringTransactionRecord, TransactionKind, TransactionRecord};
pub use summary::{SummaryError, Totals, category_breakdown};
