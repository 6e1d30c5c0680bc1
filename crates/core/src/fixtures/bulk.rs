//! Ordered batches of transactions.

use rand::Rng;
use tallyguard_shared::types::OwnerId;

use super::generator::{TransactionOverrides, make_transaction};
use super::random::random_amount;
use crate::records::{TransactionKind, TransactionRecord};

/// Bounds of a bulk amount, in cents (10.00 to 500.00).
pub const BULK_AMOUNT_CENTS: (i64, i64) = (1_000, 50_000);

/// Builds `count` transactions named `Bulk Transaction 1` .. `Bulk Transaction {count}`.
///
/// With `kind_filter` unset, each record's kind is an independent fair coin
/// flip. Small batches can come out all `Income` or all `Expense`; nothing
/// rebalances them.
pub fn make_bulk_transactions<R: Rng + ?Sized>(
    rng: &mut R,
    owner: &OwnerId,
    count: usize,
    kind_filter: Option<TransactionKind>,
) -> Vec<TransactionRecord> {
    let (lo, hi) = BULK_AMOUNT_CENTS;

    (1..=count)
        .map(|index| {
            let kind = kind_filter.unwrap_or_else(|| {
                if rng.random::<bool>() {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                }
            });
            let amount = random_amount(rng, lo, hi);
            make_transaction(
                rng,
                owner,
                TransactionOverrides::default()
                    .name(format!("Bulk Transaction {index}"))
                    .kind(kind)
                    .amount(amount),
            )
        })
        .collect()
}
