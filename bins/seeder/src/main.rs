//! Store seeder for Tallyguard manual and live testing.
//!
//! Seeds each test identity with a household-style history (weekly pay,
//! savings transfers, lunches from a pool of merchants, monthly errands)
//! and a small monthly budget of recurring items, then reads the rows back
//! and checks the totals.
//!
//! Usage: cargo run --bin seeder
//!
//! Environment:
//! - `SEED_USERS` - comma-separated identity labels (default `A,B`)
//! - `SEED_DAYS` - days of history per identity (default 90)
//! - `SEED_RESET` - delete existing rows for each identity first

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tallyguard_client::{CATEGORIES_TABLE, StoreClient, TRANSACTIONS_TABLE};
use tallyguard_core::dates::{date_range_ending_today, first_of_month};
use tallyguard_core::records::DEFAULT_CATEGORY_ID;
use tallyguard_core::{
    Frequency, HOUSEHOLD_PATTERNS, RecurringOverrides, RecurringTransactionRecord, TestDataFactory,
    Totals, TransactionKind, TransactionRecord,
};
use tallyguard_shared::{AppError, AppResult, TestConfig, TestIdentity};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monthly budget seeded for every identity.
const BUDGET: [(&str, Decimal, Frequency, TransactionKind); 5] = [
    ("Salary", dec!(5000.00), Frequency::Monthly, TransactionKind::Income),
    ("Rent", dec!(1500.00), Frequency::Monthly, TransactionKind::Expense),
    ("Utilities", dec!(200.00), Frequency::Monthly, TransactionKind::Expense),
    ("Subscriptions", dec!(50.00), Frequency::Monthly, TransactionKind::Expense),
    ("Groceries", dec!(120.00), Frequency::Weekly, TransactionKind::Expense),
];

/// Seeder settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SeedSettings {
    labels: Vec<String>,
    days: u32,
    reset: bool,
}

impl SeedSettings {
    fn from_env() -> Result<Self> {
        let labels = std::env::var("SEED_USERS")
            .unwrap_or_else(|_| "A,B".to_string())
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let days = match std::env::var("SEED_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("SEED_DAYS must be a number of days, got {raw:?}"))?,
            Err(_) => 90,
        };

        let reset = std::env::var("SEED_RESET")
            .is_ok_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            labels,
            days,
            reset,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tallyguard=debug,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = SeedSettings::from_env()?;
    let config = TestConfig::load().context("Failed to load store configuration")?;
    let admin = StoreClient::admin(&config.store).context("Seeding needs the privileged key")?;

    info!(users = ?settings.labels, days = settings.days, "Seeding store");

    let rows = admin
        .table(CATEGORIES_TABLE)
        .columns("id,name")
        .select()
        .await
        .context("Failed to read categories")?;
    let categories = category_lookup(&rows);
    info!(count = categories.len(), "Loaded categories");

    for label in &settings.labels {
        let identity = TestIdentity::from_env(label);
        seed_identity(&admin, &identity, &settings, &categories).await?;
    }

    info!("Seeding complete");
    Ok(())
}

/// Seeds one identity, skipping it if it already has rows.
async fn seed_identity(
    admin: &StoreClient,
    identity: &TestIdentity,
    settings: &SeedSettings,
    categories: &BTreeMap<String, i64>,
) -> Result<()> {
    let owner = &identity.user_id;

    if settings.reset {
        let removed = admin.cleanup_owner(owner).await?;
        info!(%owner, removed, "Reset existing rows");
    }

    let existing = admin
        .table(TRANSACTIONS_TABLE)
        .eq("user_id", owner)
        .count()
        .await?;
    if existing > 0 {
        warn!(%owner, existing, "Owner already has transactions, skipping");
        return Ok(());
    }

    let mut factory = TestDataFactory::new(owner.clone());

    let (start, end) = date_range_ending_today(settings.days);
    let transactions =
        factory.create_history(&HOUSEHOLD_PATTERNS, start, end, |name| category_id(categories, name));
    let stored = admin
        .insert_transactions(&transactions)
        .await
        .with_context(|| format!("Failed to seed transactions for {owner}"))?;
    info!(%owner, count = stored.len(), %start, %end, "Seeded transactions");

    let budget = monthly_budget(&mut factory);
    let stored = admin
        .insert_recurring(&budget)
        .await
        .with_context(|| format!("Failed to seed recurring items for {owner}"))?;
    info!(%owner, count = stored.len(), "Seeded recurring items");

    let totals = verify_seeded(admin, identity, &transactions).await?;
    info!(
        %owner,
        income = %totals.income,
        expense = %totals.expense,
        "Seeded totals verified"
    );

    Ok(())
}

/// Maps category names to ids from `categories` rows. Rows without both
/// fields are skipped.
fn category_lookup(rows: &[Value]) -> BTreeMap<String, i64> {
    rows.iter()
        .filter_map(|row| {
            let id = row.get("id").and_then(Value::as_i64)?;
            let name = row.get("name").and_then(Value::as_str)?;
            Some((name.to_string(), id))
        })
        .collect()
}

/// Resolves a category name, falling back to the default category.
fn category_id(categories: &BTreeMap<String, i64>, name: &str) -> i64 {
    categories.get(name).copied().unwrap_or_else(|| {
        warn!(category = name, "Unknown category, using default");
        DEFAULT_CATEGORY_ID
    })
}

/// Reads the owner's rows back and checks they add up to what was generated.
async fn verify_seeded(
    admin: &StoreClient,
    identity: &TestIdentity,
    generated: &[TransactionRecord],
) -> AppResult<Totals> {
    let rows = admin
        .table(TRANSACTIONS_TABLE)
        .columns("amount,type")
        .eq("user_id", &identity.user_id)
        .select()
        .await?;
    check_totals(&rows, generated)
}

fn check_totals(rows: &[Value], generated: &[TransactionRecord]) -> AppResult<Totals> {
    let stored = Totals::from_rows(rows)?;
    let expected = Totals::from_records(generated)?;
    if stored == expected {
        Ok(stored)
    } else {
        Err(AppError::Fixture(format!(
            "stored totals {stored:?} differ from generated {expected:?}"
        )))
    }
}

/// The fixed budget, starting on the first of the current month.
fn monthly_budget(factory: &mut TestDataFactory) -> Vec<RecurringTransactionRecord> {
    let start = first_of_month(date_range_ending_today(0).1);
    BUDGET
        .iter()
        .map(|&(name, amount, frequency, kind)| {
            factory.create_recurring_transaction(
                RecurringOverrides::default()
                    .name(name)
                    .amount(amount)
                    .frequency(frequency)
                    .kind(kind)
                    .start_date(start),
            )
        })
        .collect()
}
