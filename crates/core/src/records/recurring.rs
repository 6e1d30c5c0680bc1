//! Recurring transaction record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallyguard_shared::types::OwnerId;

use super::error::RecordError;
use super::types::{Frequency, TransactionKind};

/// A template describing a transaction that repeats on a cadence.
///
/// An open-ended window serializes `end_date` as JSON `null`, never as an
/// empty string, so the store cannot read it as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransactionRecord {
    /// Owning tenant.
    pub user_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Amount with two fraction digits.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Recurrence cadence.
    pub frequency: Frequency,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Account label.
    pub account_type: String,
    /// Category foreign key.
    pub category_id: i64,
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window, if bounded.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the template is still generating instances.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RecurringTransactionRecord {
    /// Checks that the window does not end before it starts.
    ///
    /// Generators never call this; a reversed window is allowed so tests can
    /// check how the store reacts to one.
    pub fn validate_window(&self) -> Result<(), RecordError> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(RecordError::EndBeforeStart {
                start: self.start_date,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Returns true if the template is active and has started on or before `on`
    /// and has not ended before it.
    #[must_use]
    pub fn is_due_on(&self, on: NaiveDate) -> bool {
        self.is_active && self.start_date <= on && self.end_date.is_none_or(|end| end >= on)
    }
}
