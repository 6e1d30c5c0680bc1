//! Pre-provisioned test identities.
//!
//! Bearer tokens are issued by an external identity provider and handed to
//! the harness through the environment. Nothing here issues or verifies them.

use crate::types::OwnerId;

/// A test user: label, owner identifier, and optional bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct TestIdentity {
    /// Short label such as `A` or `B`.
    pub label: String,
    /// Owner identifier rows are tagged with.
    pub user_id: OwnerId,
    /// Bearer token for authenticated requests.
    pub token: Option<String>,
}

impl std::fmt::Debug for TestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestIdentity")
            .field("label", &self.label)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "[hidden]"))
            .finish()
    }
}

impl TestIdentity {
    /// Environment key holding the owner id, e.g. `TEST_USER_A_ID`.
    #[must_use]
    pub fn user_id_key(label: &str) -> String {
        format!("TEST_USER_{}_ID", label.to_uppercase())
    }

    /// Environment key holding the bearer token, e.g. `TEST_USER_A_TOKEN`.
    #[must_use]
    pub fn token_key(label: &str) -> String {
        format!("TEST_USER_{}_TOKEN", label.to_uppercase())
    }

    /// Fallback owner id used when the environment does not provide one.
    #[must_use]
    pub fn default_user_id(label: &str) -> OwnerId {
        OwnerId::new(format!("test_user_{}_123", label.to_lowercase()))
    }

    /// Reads the identity for `label` from the environment.
    #[must_use]
    pub fn from_env(label: &str) -> Self {
        let user_id = std::env::var(Self::user_id_key(label))
            .map_or_else(|_| Self::default_user_id(label), OwnerId::new);
        let token = std::env::var(Self::token_key(label))
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self {
            label: label.to_string(),
            user_id,
            token,
        }
    }

    /// Returns true if a bearer token is available.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}
