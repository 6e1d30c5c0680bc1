//! Bounded wait-for-condition helpers.
//!
//! The predicate is checked, then the helper sleeps for `interval`, adding
//! `interval` to the elapsed budget, until the predicate holds or the
//! budget reaches `timeout`. A zero timeout never checks the predicate, and
//! a zero interval checks it once.

use std::future::Future;
use std::time::Duration;

use tracing::trace;

/// Blocks until `predicate` returns true or `timeout` is used up.
///
/// Returns true on the first true observation, false on timeout.
pub fn wait_for<F>(mut predicate: F, timeout: Duration, interval: Duration) -> bool
where
    F: FnMut() -> bool,
{
    if timeout.is_zero() {
        return false;
    }
    if interval.is_zero() {
        return predicate();
    }

    let mut elapsed = Duration::ZERO;
    let mut attempts = 0u32;
    while elapsed < timeout {
        attempts = attempts.saturating_add(1);
        if predicate() {
            trace!(attempts, "condition met");
            return true;
        }
        std::thread::sleep(interval);
        elapsed += interval;
    }

    trace!(attempts, ?timeout, "condition not met before timeout");
    false
}

/// Async twin of [`wait_for`], sleeping on the tokio timer.
pub async fn wait_for_async<F, Fut>(mut predicate: F, timeout: Duration, interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    if timeout.is_zero() {
        return false;
    }
    if interval.is_zero() {
        return predicate().await;
    }

    let mut elapsed = Duration::ZERO;
    let mut attempts = 0u32;
    while elapsed < timeout {
        attempts = attempts.saturating_add(1);
        if predicate().await {
            trace!(attempts, "condition met");
            return true;
        }
        tokio::time::sleep(interval).await;
        elapsed += interval;
    }

    trace!(attempts, ?timeout, "condition not met before timeout");
    false
}
