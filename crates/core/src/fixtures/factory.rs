//! Per-owner fixture factory with auto-incrementing names.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tallyguard_shared::types::OwnerId;

use chrono::NaiveDate;

use super::bulk::make_bulk_transactions;
use super::generator::{
    RecurringOverrides, TransactionOverrides, make_recurring_transaction, make_transaction,
};
use super::history::{SpendingPattern, household_history};
use crate::records::{RecurringTransactionRecord, TransactionKind, TransactionRecord};

/// Builds records for one owner, naming them `Transaction 1`, `Transaction 2`, ...
/// and `Recurring 1`, `Recurring 2`, ...
///
/// Counters only affect records created after they change. A caller-supplied
/// name always wins over the counter name, but the counter still advances.
#[derive(Debug)]
pub struct TestDataFactory<R = StdRng> {
    owner: OwnerId,
    transaction_counter: u64,
    recurring_counter: u64,
    rng: R,
}

impl TestDataFactory<StdRng> {
    /// Creates a factory seeded from the operating system.
    #[must_use]
    pub fn new(owner: impl Into<OwnerId>) -> Self {
        Self::with_rng(owner, StdRng::from_os_rng())
    }

    /// Creates a factory with a fixed seed for reproducible data.
    #[must_use]
    pub fn seeded(owner: impl Into<OwnerId>, seed: u64) -> Self {
        Self::with_rng(owner, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TestDataFactory<R> {
    /// Creates a factory drawing from `rng`.
    #[must_use]
    pub fn with_rng(owner: impl Into<OwnerId>, rng: R) -> Self {
        Self {
            owner: owner.into(),
            transaction_counter: 0,
            recurring_counter: 0,
            rng,
        }
    }

    /// Owner every record is created for.
    #[must_use]
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Number of transactions created since construction or the last reset.
    #[must_use]
    pub fn transaction_counter(&self) -> u64 {
        self.transaction_counter
    }

    /// Number of recurring transactions created since construction or the last reset.
    #[must_use]
    pub fn recurring_counter(&self) -> u64 {
        self.recurring_counter
    }

    /// Creates the next transaction.
    pub fn create_transaction(&mut self, overrides: TransactionOverrides) -> TransactionRecord {
        self.transaction_counter += 1;
        let defaults =
            TransactionOverrides::default().name(format!("Transaction {}", self.transaction_counter));
        make_transaction(&mut self.rng, &self.owner, overrides.or(defaults))
    }

    /// Creates the next recurring transaction.
    pub fn create_recurring_transaction(
        &mut self,
        overrides: RecurringOverrides,
    ) -> RecurringTransactionRecord {
        self.recurring_counter += 1;
        let defaults =
            RecurringOverrides::default().name(format!("Recurring {}", self.recurring_counter));
        make_recurring_transaction(&mut self.rng, &self.owner, overrides.or(defaults))
    }

    /// Creates a bulk batch for this owner. Does not touch the counters.
    pub fn create_bulk_transactions(
        &mut self,
        count: usize,
        kind_filter: Option<TransactionKind>,
    ) -> Vec<TransactionRecord> {
        make_bulk_transactions(&mut self.rng, &self.owner, count, kind_filter)
    }

    /// Expands spending patterns over `start..=end` for this owner. Does not
    /// touch the counters.
    pub fn create_history<F>(
        &mut self,
        patterns: &[SpendingPattern],
        start: NaiveDate,
        end: NaiveDate,
        category_id: F,
    ) -> Vec<TransactionRecord>
    where
        F: FnMut(&str) -> i64,
    {
        household_history(&mut self.rng, &self.owner, patterns, start, end, category_id)
    }

    /// Sets both counters back to zero.
    pub fn reset(&mut self) {
        self.transaction_counter = 0;
        self.recurring_counter = 0;
    }
}
