//! Shared setup for the live store suites.
//!
//! Connection settings come from `.env.test`, `config/`, and
//! `TALLYGUARD__*` variables. Every suite is `#[ignore]`d; run them with
//! `cargo test -p tallyguard-client -- --ignored` against a provisioned store.

#![allow(dead_code)]

use serde_json::Value;
use tallyguard_client::{StoreClient, TestIdentity};
use tallyguard_shared::TestConfig;
use tallyguard_shared::types::OwnerId;
use uuid::Uuid;

/// Loads the harness configuration or aborts the test.
pub fn config() -> TestConfig {
    TestConfig::load().expect("store configuration must be available for live suites")
}

/// Privileged client that bypasses row-level security.
pub fn admin() -> StoreClient {
    StoreClient::admin(&config().store).expect("TALLYGUARD__STORE__SERVICE_KEY must be set")
}

/// Client with only the public key.
pub fn anonymous() -> StoreClient {
    StoreClient::anonymous(&config().store).expect("anonymous client")
}

/// Pre-provisioned identity `label` with its authenticated client.
pub fn user(label: &str) -> (TestIdentity, StoreClient) {
    let identity = TestIdentity::from_env(label);
    let client = StoreClient::for_identity(&config().store, &identity)
        .unwrap_or_else(|e| panic!("{} must be set: {e}", TestIdentity::token_key(label)));
    (identity, client)
}

/// Owner id no other test run will use.
pub fn unique_owner() -> OwnerId {
    OwnerId::new(format!("test_user_{}", Uuid::new_v4().simple()))
}

/// Removes every row owned by `owners`, logging instead of failing.
pub async fn cleanup(admin: &StoreClient, owners: &[&OwnerId]) {
    for owner in owners {
        if let Err(e) = admin.cleanup_owner(owner).await {
            eprintln!("cleanup for {owner} failed: {e}");
        }
    }
}

/// `id` column of a stored row.
pub fn id_of(row: &Value) -> i64 {
    row["id"].as_i64().expect("stored row has an integer id")
}

/// `name` column of a stored row.
pub fn name_of(row: &Value) -> &str {
    row["name"].as_str().expect("stored row has a name")
}
