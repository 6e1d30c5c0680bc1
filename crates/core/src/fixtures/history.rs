//! Household-style transaction history.
//!
//! A [`SpendingPattern`] describes one stream of money: where it comes from
//! or goes to, how much, and how often. [`household_history`] expands a set
//! of patterns over a date window into dated records, so dashboards read
//! back something closer to a real account than `Bulk Transaction N` rows.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::IndexedRandom;
use tallyguard_shared::types::OwnerId;

use super::generator::{TransactionOverrides, make_transaction};
use super::random::random_amount;
use crate::dates::first_of_month;
use crate::records::{TransactionKind, TransactionRecord};

/// How often a pattern produces a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// On `weekday`, then every `every_days` days.
    Weekday {
        /// First weekday in the window to land on.
        weekday: Weekday,
        /// Gap between occurrences (7 weekly, 14 fortnightly).
        every_days: u32,
    },
    /// Every `n` days from the window start.
    EveryDays(u32),
    /// A random count in `min..=max` on random days of each calendar month.
    PerMonth {
        /// Fewest records per month.
        min: u32,
        /// Most records per month.
        max: u32,
    },
}

/// One recurring stream of income or spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendingPattern {
    /// Record names; one is picked per record.
    pub merchants: &'static [&'static str],
    /// Amount bounds in cents, inclusive.
    pub amount_cents: (i64, i64),
    /// Income or expense.
    pub kind: TransactionKind,
    /// Account label.
    pub account_type: &'static str,
    /// Category name, resolved to an id by the caller.
    pub category: &'static str,
    /// Description on every record.
    pub description: &'static str,
    /// How often records occur.
    pub cadence: Cadence,
}

/// A salaried single-person household.
pub const HOUSEHOLD_PATTERNS: [SpendingPattern; 11] = [
    SpendingPattern {
        merchants: &["Employer Payrun"],
        amount_cents: (170_000, 195_000),
        kind: TransactionKind::Income,
        account_type: "Checking",
        category: "Salary",
        description: "Weekly salary payment",
        cadence: Cadence::Weekday {
            weekday: Weekday::Thu,
            every_days: 7,
        },
    },
    SpendingPattern {
        merchants: &["Side Income - Friends / Small Work"],
        amount_cents: (30_000, 50_000),
        kind: TransactionKind::Income,
        account_type: "Checking",
        category: "Freelance",
        description: "Side work payment",
        cadence: Cadence::PerMonth { min: 2, max: 4 },
    },
    SpendingPattern {
        merchants: &["Transfer to Savings"],
        amount_cents: (20_000, 20_000),
        kind: TransactionKind::Expense,
        account_type: "Checking",
        category: "Savings",
        description: "Weekly savings transfer",
        cadence: Cadence::Weekday {
            weekday: Weekday::Mon,
            every_days: 7,
        },
    },
    SpendingPattern {
        merchants: &["Al Sultan", "Mezza", "McDonalds", "Hungry Jacks", "Subway", "Byblos"],
        amount_cents: (1_200, 3_000),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Food",
        description: "Lunch",
        cadence: Cadence::EveryDays(3),
    },
    SpendingPattern {
        merchants: &["Coffee Shop"],
        amount_cents: (500, 1_500),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Food",
        description: "Coffee",
        cadence: Cadence::PerMonth { min: 8, max: 12 },
    },
    SpendingPattern {
        merchants: &["Grocery Shop"],
        amount_cents: (2_000, 6_000),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Food",
        description: "Weekly groceries",
        cadence: Cadence::EveryDays(7),
    },
    SpendingPattern {
        merchants: &["Parking"],
        amount_cents: (500, 2_500),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Transport",
        description: "Parking fee",
        cadence: Cadence::PerMonth { min: 2, max: 4 },
    },
    SpendingPattern {
        merchants: &["Uber"],
        amount_cents: (1_000, 3_000),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Transport",
        description: "Uber ride",
        cadence: Cadence::PerMonth { min: 1, max: 3 },
    },
    SpendingPattern {
        merchants: &["Clothing Purchase"],
        amount_cents: (5_000, 15_000),
        kind: TransactionKind::Expense,
        account_type: "Credit Card",
        category: "Shopping",
        description: "Clothing",
        cadence: Cadence::PerMonth { min: 1, max: 2 },
    },
    SpendingPattern {
        merchants: &["Laundry"],
        amount_cents: (600, 1_200),
        kind: TransactionKind::Expense,
        account_type: "Cash",
        category: "Services",
        description: "Laundry service",
        cadence: Cadence::PerMonth { min: 2, max: 2 },
    },
    SpendingPattern {
        merchants: &["Donation - Welfare Fund"],
        amount_cents: (2_000, 2_000),
        kind: TransactionKind::Expense,
        account_type: "Checking",
        category: "Charity",
        description: "Charity donation",
        cadence: Cadence::PerMonth { min: 2, max: 3 },
    },
];

impl SpendingPattern {
    /// Dates this pattern falls on within `start..=end`, ascending.
    pub fn dates<R: Rng + ?Sized>(&self, rng: &mut R, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        match self.cadence {
            Cadence::Weekday {
                weekday,
                every_days,
            } => weekday_series(start, end, weekday, every_days),
            Cadence::EveryDays(n) => step_series(start, end, n),
            Cadence::PerMonth { min, max } => month_windows(start, end)
                .into_iter()
                .flat_map(|(from, to)| {
                    let count = rng.random_range(min.min(max)..=max.max(min));
                    random_dates_in(&mut *rng, from, to, count)
                })
                .collect(),
        }
    }

    fn merchant<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.merchants.choose(rng).copied().unwrap_or(self.description)
    }
}

/// Dates from `start` to `end` inclusive, `every_days` apart. A zero step
/// is treated as one day.
#[must_use]
pub fn step_series(start: NaiveDate, end: NaiveDate, every_days: u32) -> Vec<NaiveDate> {
    let step = Days::new(u64::from(every_days.max(1)));
    std::iter::successors(Some(start), |d| d.checked_add_days(step))
        .take_while(|d| *d <= end)
        .collect()
}

/// Every `every_days` days starting on the first `weekday` on or after `start`.
#[must_use]
pub fn weekday_series(
    start: NaiveDate,
    end: NaiveDate,
    weekday: Weekday,
    every_days: u32,
) -> Vec<NaiveDate> {
    let lead = (7 + weekday.num_days_from_monday() - start.weekday().num_days_from_monday()) % 7;
    match start.checked_add_days(Days::new(u64::from(lead))) {
        Some(first) => step_series(first, end, every_days),
        None => Vec::new(),
    }
}

/// `count` uniformly drawn dates in `start..=end`, sorted. Dates may repeat.
pub fn random_dates_in<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
    count: u32,
) -> Vec<NaiveDate> {
    let Ok(span) = u64::try_from((end - start).num_days()) else {
        return Vec::new();
    };
    let mut dates: Vec<NaiveDate> = (0..count)
        .filter_map(|_| start.checked_add_days(Days::new(rng.random_range(0..=span))))
        .collect();
    dates.sort_unstable();
    dates
}

/// Calendar months overlapping `start..=end`, each clipped to the window.
fn month_windows(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let mut month = first_of_month(start);
    while month <= end {
        let Some(next) = month.checked_add_months(Months::new(1)) else {
            windows.push((month.max(start), end));
            break;
        };
        let last = next.pred_opt().unwrap_or(month);
        windows.push((month.max(start), last.min(end)));
        month = next;
    }
    windows
}

/// Expands `patterns` over `start..=end` for `owner`, sorted by date.
///
/// `category_id` maps each pattern's category name to a store id.
pub fn household_history<R, F>(
    rng: &mut R,
    owner: &OwnerId,
    patterns: &[SpendingPattern],
    start: NaiveDate,
    end: NaiveDate,
    mut category_id: F,
) -> Vec<TransactionRecord>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> i64,
{
    let mut records = Vec::new();
    for pattern in patterns {
        let category = category_id(pattern.category);
        for date in pattern.dates(rng, start, end) {
            let (lo, hi) = pattern.amount_cents;
            let overrides = TransactionOverrides::default()
                .name(pattern.merchant(rng))
                .amount(random_amount(rng, lo, hi))
                .kind(pattern.kind)
                .account_type(pattern.account_type)
                .category_id(category)
                .date(date)
                .description(pattern.description);
            records.push(make_transaction(rng, owner, overrides));
        }
    }
    records.sort_by_key(|r| r.date);
    records
}
