//! Property-based tests for the fixture generators.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tallyguard_shared::types::OwnerId;

use super::bulk::make_bulk_transactions;
use super::factory::TestDataFactory;
use super::generator::{
    RecurringOverrides, TransactionOverrides, make_recurring_transaction, make_transaction,
};
use super::random::random_token;
use crate::records::TransactionKind;

/// Strategy for an arbitrary caller-supplied amount at cent precision.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for an optional kind filter.
fn kind_filter() -> impl Strategy<Value = Option<TransactionKind>> {
    prop_oneof![
        Just(None),
        Just(Some(TransactionKind::Income)),
        Just(Some(TransactionKind::Expense)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Unspecified transaction amounts stay within 10.00..=1000.00 at two places.
    #[test]
    fn prop_default_amount_in_bounds(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let record = make_transaction(&mut rng, &OwnerId::new("u"), TransactionOverrides::default());
        prop_assert!(record.amount >= dec!(10.00) && record.amount <= dec!(1000.00));
        prop_assert_eq!(record.amount.scale(), 2);
    }

    /// Specified amounts come back exactly.
    #[test]
    fn prop_specified_amount_is_exact(seed in any::<u64>(), amount in any_amount()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let record = make_transaction(
            &mut rng,
            &OwnerId::new("u"),
            TransactionOverrides::default().amount(amount),
        );
        prop_assert_eq!(record.amount, amount);
    }

    /// Recurring records default to active with no end date.
    #[test]
    fn prop_recurring_defaults(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let record = make_recurring_transaction(&mut rng, &OwnerId::new("u"), RecurringOverrides::default());
        prop_assert!(record.is_active);
        prop_assert!(record.end_date.is_none());
        prop_assert!(record.amount >= dec!(10.00) && record.amount <= dec!(500.00));
    }

    /// Bulk batches have the requested size, owner, and kind.
    #[test]
    fn prop_bulk_shape(seed in any::<u64>(), count in 0usize..80, filter in kind_filter()) {
        let owner = OwnerId::new("owner-under-test");
        let mut rng = StdRng::seed_from_u64(seed);
        let records = make_bulk_transactions(&mut rng, &owner, count, filter);

        prop_assert_eq!(records.len(), count);
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(&record.user_id, &owner);
            prop_assert_eq!(&record.name, &format!("Bulk Transaction {}", i + 1));
            if let Some(kind) = filter {
                prop_assert_eq!(record.kind, kind);
            }
        }
    }

    /// Factory names are gap-free for any number of calls.
    #[test]
    fn prop_factory_names_gap_free(seed in any::<u64>(), calls in 1usize..40) {
        let mut factory = TestDataFactory::seeded("u", seed);
        for n in 1..=calls {
            let record = factory.create_transaction(TransactionOverrides::default());
            prop_assert_eq!(record.name, format!("Transaction {n}"));
        }
    }

    /// Tokens have the requested length over the alphanumeric alphabet.
    #[test]
    fn prop_token_shape(seed in any::<u64>(), length in 0usize..128) {
        let mut rng = StdRng::seed_from_u64(seed);
        let token = random_token(&mut rng, length);
        prop_assert_eq!(token.len(), length);
        prop_assert!(token.bytes().all(|b| b.is_ascii_alphanumeric()));
    }
}
