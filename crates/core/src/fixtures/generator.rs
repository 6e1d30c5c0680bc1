//! Single-record generators with field-level overrides.
//!
//! Every field left unset in the overrides falls back to a randomized or
//! fixed default. Set fields are used exactly as given.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use tallyguard_shared::types::OwnerId;

use super::random::{random_amount, random_token};
use crate::records::{
    DEFAULT_ACCOUNT_TYPE, DEFAULT_CATEGORY_ID, Frequency, RecurringTransactionRecord,
    TransactionKind, TransactionRecord,
};

/// Bounds of a generated transaction amount, in cents (10.00 to 1000.00).
pub const TRANSACTION_AMOUNT_CENTS: (i64, i64) = (1_000, 100_000);

/// Bounds of a generated recurring amount, in cents (10.00 to 500.00).
pub const RECURRING_AMOUNT_CENTS: (i64, i64) = (1_000, 50_000);

/// Optional field values for [`make_transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOverrides {
    /// Display name.
    pub name: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Income or expense.
    pub kind: Option<TransactionKind>,
    /// Account label.
    pub account_type: Option<String>,
    /// Category foreign key.
    pub category_id: Option<i64>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Description.
    pub description: Option<String>,
}

impl TransactionOverrides {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the amount.
    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the kind.
    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the account label.
    #[must_use]
    pub fn account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the date.
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Field-by-field merge: values set on `self` win over `base`.
    #[must_use]
    pub fn or(self, base: Self) -> Self {
        Self {
            name: self.name.or(base.name),
            amount: self.amount.or(base.amount),
            kind: self.kind.or(base.kind),
            account_type: self.account_type.or(base.account_type),
            category_id: self.category_id.or(base.category_id),
            date: self.date.or(base.date),
            description: self.description.or(base.description),
        }
    }
}

/// Optional field values for [`make_recurring_transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringOverrides {
    /// Display name.
    pub name: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Cadence.
    pub frequency: Option<Frequency>,
    /// Income or expense.
    pub kind: Option<TransactionKind>,
    /// Account label.
    pub account_type: Option<String>,
    /// Category foreign key.
    pub category_id: Option<i64>,
    /// First day of the window.
    pub start_date: Option<NaiveDate>,
    /// Last day of the window.
    pub end_date: Option<NaiveDate>,
    /// Active flag.
    pub is_active: Option<bool>,
}

impl RecurringOverrides {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the amount.
    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the cadence.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the kind.
    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the account label.
    #[must_use]
    pub fn account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Field-by-field merge: values set on `self` win over `base`.
    #[must_use]
    pub fn or(self, base: Self) -> Self {
        Self {
            name: self.name.or(base.name),
            amount: self.amount.or(base.amount),
            frequency: self.frequency.or(base.frequency),
            kind: self.kind.or(base.kind),
            account_type: self.account_type.or(base.account_type),
            category_id: self.category_id.or(base.category_id),
            start_date: self.start_date.or(base.start_date),
            end_date: self.end_date.or(base.end_date),
            is_active: self.is_active.or(base.is_active),
        }
    }
}

/// Today's calendar date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Builds one transaction for `owner`.
///
/// Defaults: name `Test Transaction <5 chars>`, amount in 10.00..=1000.00,
/// `Expense`, `Cash`, category 1, today, description `Test description <8 chars>`.
pub fn make_transaction<R: Rng + ?Sized>(
    rng: &mut R,
    owner: &OwnerId,
    overrides: TransactionOverrides,
) -> TransactionRecord {
    let name = overrides
        .name
        .unwrap_or_else(|| format!("Test Transaction {}", random_token(rng, 5)));
    let amount = overrides.amount.unwrap_or_else(|| {
        let (lo, hi) = TRANSACTION_AMOUNT_CENTS;
        random_amount(rng, lo, hi)
    });
    let description = overrides
        .description
        .unwrap_or_else(|| format!("Test description {}", random_token(rng, 8)));

    TransactionRecord {
        user_id: owner.clone(),
        name,
        amount,
        kind: overrides.kind.unwrap_or(TransactionKind::Expense),
        account_type: overrides
            .account_type
            .unwrap_or_else(|| DEFAULT_ACCOUNT_TYPE.to_string()),
        category_id: overrides.category_id.unwrap_or(DEFAULT_CATEGORY_ID),
        date: overrides.date.unwrap_or_else(today),
        description: Some(description),
    }
}

/// Builds one recurring transaction for `owner`.
///
/// Defaults: name `Recurring <5 chars>`, amount in 10.00..=500.00, `Monthly`,
/// `Expense`, `Cash`, category 1, starting today, no end date, active.
pub fn make_recurring_transaction<R: Rng + ?Sized>(
    rng: &mut R,
    owner: &OwnerId,
    overrides: RecurringOverrides,
) -> RecurringTransactionRecord {
    let name = overrides
        .name
        .unwrap_or_else(|| format!("Recurring {}", random_token(rng, 5)));
    let amount = overrides.amount.unwrap_or_else(|| {
        let (lo, hi) = RECURRING_AMOUNT_CENTS;
        random_amount(rng, lo, hi)
    });

    RecurringTransactionRecord {
        user_id: owner.clone(),
        name,
        amount,
        frequency: overrides.frequency.unwrap_or(Frequency::Monthly),
        kind: overrides.kind.unwrap_or(TransactionKind::Expense),
        account_type: overrides
            .account_type
            .unwrap_or_else(|| DEFAULT_ACCOUNT_TYPE.to_string()),
        category_id: overrides.category_id.unwrap_or(DEFAULT_CATEGORY_ID),
        start_date: overrides.start_date.unwrap_or_else(today),
        end_date: overrides.end_date,
        is_active: overrides.is_active.unwrap_or(true),
    }
}
