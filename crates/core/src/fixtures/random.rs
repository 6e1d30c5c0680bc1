//! Random tokens and amounts.
//!
//! Not cryptographically secure. Collisions are rare, not impossible.

use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;

/// Returns exactly `length` characters drawn uniformly from `[A-Za-z0-9]`.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Returns a uniformly drawn amount between `min` and `max` inclusive,
/// at cent precision.
///
/// Bounds are given in cents, e.g. `1_000..=100_000` for 10.00 to 1000.00.
pub fn random_amount<R: Rng + ?Sized>(rng: &mut R, min_cents: i64, max_cents: i64) -> Decimal {
    let (lo, hi) = if min_cents <= max_cents {
        (min_cents, max_cents)
    } else {
        (max_cents, min_cents)
    };
    Decimal::new(rng.random_range(lo..=hi), 2)
}
