//! One-directional record comparison.
//!
//! Every field of the expected record must appear in the actual one with an
//! equal value. Fractional numbers may differ by less than one cent, which
//! absorbs the store's `numeric` round trip. Fields present only in the
//! actual record are ignored, and volatile fields are skipped entirely.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tallyguard_shared::AppError;
use thiserror::Error;

use crate::numeric::{number_to_decimal, value_to_decimal};
use crate::records::TransactionRecord;

/// Fields assigned by the store that never match a generated record.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Largest difference (exclusive) tolerated between fractional values.
pub const AMOUNT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Why two records are not equivalent.
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// The actual record lacks a field the expected one has.
    #[error("Field {field} missing from actual record")]
    MissingField {
        /// Missing field name.
        field: String,
    },

    /// A field holds a different value.
    #[error("Field {field}: expected {expected}, got {actual}")]
    Mismatch {
        /// Field name.
        field: String,
        /// Expected value.
        expected: Value,
        /// Actual value.
        actual: Value,
    },

    /// One side is not a JSON object.
    #[error("{side} record is not a JSON object")]
    NotAnObject {
        /// `actual` or `expected`.
        side: &'static str,
    },

    /// A record could not be converted to JSON.
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ComparisonError {
    /// Name of the offending field, if the error concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::Mismatch { field, .. } => Some(field),
            Self::NotAnObject { .. } | Self::Serialize(_) => None,
        }
    }
}

impl From<ComparisonError> for AppError {
    fn from(err: ComparisonError) -> Self {
        match err {
            ComparisonError::Serialize(_) => Self::Internal(err.to_string()),
            _ => Self::Fixture(err.to_string()),
        }
    }
}

/// Compares two JSON objects, skipping `excluded` fields.
pub fn compare_values(
    actual: &Value,
    expected: &Value,
    excluded: &[&str],
) -> Result<(), ComparisonError> {
    let actual = as_object(actual, "actual")?;
    let expected = as_object(expected, "expected")?;

    for (field, want) in expected {
        if excluded.contains(&field.as_str()) {
            continue;
        }
        let Some(got) = actual.get(field) else {
            return Err(ComparisonError::MissingField {
                field: field.clone(),
            });
        };
        if !field_matches(got, want) {
            return Err(ComparisonError::Mismatch {
                field: field.clone(),
                expected: want.clone(),
                actual: got.clone(),
            });
        }
    }

    Ok(())
}

/// Compares any two serializable records, skipping `excluded` fields.
pub fn compare_records<A, E>(actual: &A, expected: &E, excluded: &[&str]) -> Result<(), ComparisonError>
where
    A: Serialize + ?Sized,
    E: Serialize + ?Sized,
{
    let actual = serde_json::to_value(actual)?;
    let expected = serde_json::to_value(expected)?;
    compare_values(&actual, &expected, excluded)
}

/// Panics with a message naming the field and both values unless the
/// records are equivalent.
#[track_caller]
pub fn assert_equivalent<A, E>(actual: &A, expected: &E, excluded: &[&str])
where
    A: Serialize + ?Sized,
    E: Serialize + ?Sized,
{
    if let Err(e) = compare_records(actual, expected, excluded) {
        panic!("{e}");
    }
}

/// Asserts that a store row matches a generated transaction, ignoring the
/// store-assigned `id`, `created_at`, and `updated_at`.
#[track_caller]
pub fn assert_transaction_equals(actual: &Value, expected: &TransactionRecord) {
    assert_equivalent(actual, expected, &DEFAULT_EXCLUDED_FIELDS);
}

fn as_object<'a>(value: &'a Value, side: &'static str) -> Result<&'a Map<String, Value>, ComparisonError> {
    value
        .as_object()
        .ok_or(ComparisonError::NotAnObject { side })
}

fn field_matches(actual: &Value, expected: &Value) -> bool {
    match expected {
        Value::Number(n) if n.is_f64() => {
            match (number_to_decimal(n), value_to_decimal(actual)) {
                (Some(want), Some(got)) => got
                    .checked_sub(want)
                    .is_some_and(|d| d.abs() < AMOUNT_TOLERANCE),
                _ => false,
            }
        }
        _ => actual == expected,
    }
}
