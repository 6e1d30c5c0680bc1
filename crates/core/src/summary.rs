//! Income, expense, and per-category totals.
//!
//! Used to check dashboard-style aggregates computed over rows read back
//! from the store. All sums stay in `Decimal` and overflow is reported
//! rather than panicking.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tallyguard_shared::AppError;
use thiserror::Error;

use crate::numeric::value_to_decimal;
use crate::records::{TransactionKind, TransactionRecord};

/// Why a set of rows could not be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// A row lacks a field or holds a malformed value.
    #[error("Row {index} has no usable {field}")]
    BadRow {
        /// Position of the row in the input.
        index: usize,
        /// Field that was missing or malformed.
        field: &'static str,
    },

    /// A running total left the `Decimal` range.
    #[error("Total overflowed at row {index}")]
    Overflow {
        /// Position of the row whose amount overflowed.
        index: usize,
    },
}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        Self::Fixture(err.to_string())
    }
}

/// Income and expense totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expense: Decimal,
}

impl Totals {
    /// Income minus expense, or `None` if it does not fit a `Decimal`.
    #[must_use]
    pub fn net(&self) -> Option<Decimal> {
        self.income.checked_sub(self.expense)
    }

    /// Adds one amount of the given kind, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, kind: TransactionKind, amount: Decimal) -> Option<Self> {
        match kind {
            TransactionKind::Income => Some(Self {
                income: self.income.checked_add(amount)?,
                ..self
            }),
            TransactionKind::Expense => Some(Self {
                expense: self.expense.checked_add(amount)?,
                ..self
            }),
        }
    }

    /// Totals over typed records.
    pub fn from_records<'a, I>(records: I) -> Result<Self, SummaryError>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .try_fold(Self::default(), |totals, (index, r)| {
                totals
                    .checked_add(r.kind, r.amount)
                    .ok_or(SummaryError::Overflow { index })
            })
    }

    /// Totals over raw store rows (`type` and `amount` fields).
    pub fn from_rows(rows: &[Value]) -> Result<Self, SummaryError> {
        let mut totals = Self::default();
        for (index, row) in rows.iter().enumerate() {
            let kind = row
                .get("type")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<TransactionKind>().ok())
                .ok_or(SummaryError::BadRow { index, field: "type" })?;
            let amount = row_amount(row, index)?;
            totals = totals
                .checked_add(kind, amount)
                .ok_or(SummaryError::Overflow { index })?;
        }
        Ok(totals)
    }
}

/// Sums `amount` per `category_id` over raw store rows.
pub fn category_breakdown(rows: &[Value]) -> Result<BTreeMap<i64, Decimal>, SummaryError> {
    let mut totals = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        let category = row
            .get("category_id")
            .and_then(Value::as_i64)
            .ok_or(SummaryError::BadRow {
                index,
                field: "category_id",
            })?;
        let amount = row_amount(row, index)?;
        let total = totals.entry(category).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(amount)
            .ok_or(SummaryError::Overflow { index })?;
    }
    Ok(totals)
}

/// Sums `amount` over raw store rows regardless of kind.
pub fn sum_amounts(rows: &[Value]) -> Result<Decimal, SummaryError> {
    rows.iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |acc, (index, row)| {
            acc.checked_add(row_amount(row, index)?)
                .ok_or(SummaryError::Overflow { index })
        })
}

fn row_amount(row: &Value, index: usize) -> Result<Decimal, SummaryError> {
    row.get("amount")
        .and_then(value_to_decimal)
        .ok_or(SummaryError::BadRow {
            index,
            field: "amount",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn dashboard_rows() -> Vec<Value> {
        vec![
            json!({"name": "Salary", "amount": 5000.00, "type": "Income", "category_id": 1}),
            json!({"name": "Rent", "amount": "1500.00", "type": "Expense", "category_id": 2}),
            json!({"name": "Groceries", "amount": 300, "type": "Expense", "category_id": 1}),
            json!({"name": "Freelance", "amount": 1000.00, "type": "Income", "category_id": 3}),
        ]
    }

    #[test]
    fn test_totals_from_rows() {
        let totals = Totals::from_rows(&dashboard_rows()).unwrap();
        assert_eq!(totals.income, dec!(6000));
        assert_eq!(totals.expense, dec!(1800));
        assert_eq!(totals.net(), Some(dec!(4200)));
    }

    #[test]
    fn test_category_breakdown() {
        let rows = vec![
            json!({"amount": 100.00, "category_id": 1}),
            json!({"amount": 150.00, "category_id": 1}),
            json!({"amount": 50.00, "category_id": 2}),
            json!({"amount": 75.00, "category_id": 2}),
        ];
        let breakdown = category_breakdown(&rows).unwrap();
        assert_eq!(breakdown[&1], dec!(250));
        assert_eq!(breakdown[&2], dec!(125));
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn test_bad_row_reports_index_and_field() {
        let rows = vec![
            json!({"amount": 1.0, "type": "Income"}),
            json!({"amount": 2.0, "type": "Transfer"}),
        ];
        assert_eq!(
            Totals::from_rows(&rows),
            Err(SummaryError::BadRow { index: 1, field: "type" })
        );
        assert_eq!(
            category_breakdown(&rows),
            Err(SummaryError::BadRow {
                index: 0,
                field: "category_id"
            })
        );
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts(&dashboard_rows()).unwrap(), dec!(7800));
        assert_eq!(sum_amounts(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_from_records_matches_rows() {
        let records: Vec<TransactionRecord> = dashboard_rows()
            .into_iter()
            .map(|mut row| {
                row["user_id"] = json!("u");
                row["account_type"] = json!("Cash");
                row["date"] = json!("2026-10-01");
                serde_json::from_value(row).unwrap()
            })
            .collect();
        assert_eq!(
            Totals::from_records(&records).unwrap(),
            Totals::from_rows(&dashboard_rows()).unwrap()
        );
    }

    const NEAR_MAX: &str = "79228162514264337593543950335";

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        let rows = vec![
            json!({"amount": NEAR_MAX, "type": "Income", "category_id": 1}),
            json!({"amount": NEAR_MAX, "type": "Income", "category_id": 1}),
        ];
        assert_eq!(Totals::from_rows(&rows), Err(SummaryError::Overflow { index: 1 }));
        assert_eq!(category_breakdown(&rows), Err(SummaryError::Overflow { index: 1 }));
        assert_eq!(sum_amounts(&rows), Err(SummaryError::Overflow { index: 1 }));
    }

    #[test]
    fn test_net_out_of_range_is_none() {
        let totals = Totals {
            income: Decimal::MAX,
            expense: dec!(-1),
        };
        assert_eq!(totals.net(), None);
    }

    #[test]
    fn test_summary_error_converts_to_fixture_error() {
        let err: AppError = SummaryError::Overflow { index: 3 }.into();
        assert_eq!(err.error_code(), "FIXTURE_MISMATCH");
        assert_eq!(err.to_string(), "Fixture mismatch: Total overflowed at row 3");
    }
}
