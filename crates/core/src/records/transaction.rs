//! One-off transaction record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallyguard_shared::types::OwnerId;

use super::types::TransactionKind;

/// A single income or expense row.
///
/// Serializes to the store's `transactions` row shape. `amount` goes out as
/// a JSON number because the store's `numeric` column accepts one directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Owning tenant.
    pub user_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Amount with two fraction digits.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Account label such as `Cash`, `Credit`, or `Debit`.
    pub account_type: String,
    /// Category foreign key.
    pub category_id: i64,
    /// Day the transaction happened.
    pub date: NaiveDate,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionRecord {
    /// Amount with the sign of its direction: negative for expenses.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
