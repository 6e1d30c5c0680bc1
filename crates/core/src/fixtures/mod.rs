//! Synthetic record generation.
//!
//! Every generator takes its randomness source explicitly, so a test can
//! seed one for reproducible data or share a factory-owned one:
//! - `random` - alphanumeric tokens and bounded amounts
//! - `generator` - single records with field-level overrides
//! - `bulk` - ordered batches of transactions
//! - `factory` - per-owner counters on top of the generators
//! - `history` - household-style spending patterns over a date window

pub mod bulk;
pub mod factory;
pub mod generator;
pub mod history;
pub mod random;

#[cfg(test)]
mod generator_props;

pub use bulk::make_bulk_transactions;
pub use factory::TestDataFactory;
pub use generator::{
    RecurringOverrides, TransactionOverrides, make_recurring_transaction, make_transaction,
};
pub use history::{Cadence, HOUSEHOLD_PATTERNS, SpendingPattern, household_history};
pub use random::{random_amount, random_token};
