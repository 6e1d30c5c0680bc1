//! Store connections for the three caller roles.
//!
//! Every request carries the project key in `apikey` and a bearer in
//! `Authorization`. The anonymous role uses the public key as its bearer,
//! the authenticated role uses a user token issued elsewhere, and the admin
//! role uses the privileged key for both, which bypasses row-level security.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tallyguard_shared::types::OwnerId;
use tallyguard_shared::{StoreConfig, TestIdentity};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::query::TableQuery;

/// Table holding one-off transactions.
pub const TRANSACTIONS_TABLE: &str = "transactions";
/// Table holding recurring budget items.
pub const RECURRING_TABLE: &str = "recurring_transactions";
/// Table holding categories.
pub const CATEGORIES_TABLE: &str = "categories";

/// Who a client acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Public key only.
    Anonymous,
    /// A signed-in test user.
    Authenticated,
    /// Privileged key, bypasses row-level security.
    Admin,
}

/// REST client bound to one role.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    api_key: HeaderValue,
    authorization: HeaderValue,
    rest_url: String,
    schema: String,
    role: ClientRole,
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("rest_url", &self.rest_url)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl StoreClient {
    /// Client acting with the public key.
    pub fn anonymous(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::build(config, &config.anon_key, &config.anon_key, ClientRole::Anonymous)
    }

    /// Client acting as the user who owns `token`.
    pub fn authenticated(config: &StoreConfig, token: &str) -> Result<Self, StoreError> {
        Self::build(config, &config.anon_key, token, ClientRole::Authenticated)
    }

    /// Client acting as a test identity.
    ///
    /// Fails with [`StoreError::MissingToken`] if the identity has no token.
    pub fn for_identity(config: &StoreConfig, identity: &TestIdentity) -> Result<Self, StoreError> {
        let token = identity
            .token
            .as_deref()
            .ok_or_else(|| StoreError::MissingToken(identity.label.clone()))?;
        Self::authenticated(config, token)
    }

    /// Client acting with the privileged key.
    pub fn admin(config: &StoreConfig) -> Result<Self, StoreError> {
        let key = config
            .service_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(StoreError::MissingServiceKey)?;
        Self::build(config, key, key, ClientRole::Admin)
    }

    fn build(
        config: &StoreConfig,
        api_key: &str,
        bearer: &str,
        role: ClientRole,
    ) -> Result<Self, StoreError> {
        let api_key = sensitive_header(api_key)?;
        let authorization = sensitive_header(&format!("Bearer {bearer}"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        debug!(url = %config.url, ?role, "Store client created");

        Ok(Self {
            http,
            api_key,
            authorization,
            rest_url: config.rest_url(),
            schema: config.schema.clone(),
            role,
        })
    }

    /// Role this client acts as.
    #[must_use]
    pub const fn role(&self) -> ClientRole {
        self.role
    }

    /// REST root URL.
    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Starts a query against `table`.
    #[must_use]
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Request against `table` carrying this client's credentials.
    ///
    /// Reads select the schema with `Accept-Profile`, writes with
    /// `Content-Profile`.
    pub(crate) fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let profile_header = if method == Method::GET || method == Method::HEAD {
            "Accept-Profile"
        } else {
            "Content-Profile"
        };
        self.http
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", self.api_key.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .header(profile_header, self.schema.as_str())
    }

    /// Inserts rows into `transactions` and returns the stored rows.
    pub async fn insert_transactions<T>(&self, rows: &T) -> Result<Vec<Value>, StoreError>
    where
        T: serde::Serialize + ?Sized,
    {
        self.table(TRANSACTIONS_TABLE).insert(rows).await
    }

    /// Inserts rows into `recurring_transactions` and returns the stored rows.
    pub async fn insert_recurring<T>(&self, rows: &T) -> Result<Vec<Value>, StoreError>
    where
        T: serde::Serialize + ?Sized,
    {
        self.table(RECURRING_TABLE).insert(rows).await
    }

    /// Deletes every transaction and recurring item owned by `owner`.
    ///
    /// Returns the number of rows removed. Without the admin role this only
    /// removes rows visible to the caller.
    pub async fn cleanup_owner(&self, owner: &OwnerId) -> Result<usize, StoreError> {
        let transactions = self
            .table(TRANSACTIONS_TABLE)
            .eq("user_id", owner)
            .delete()
            .await?
            .len();
        let recurring = self
            .table(RECURRING_TABLE)
            .eq("user_id", owner)
            .delete()
            .await?
            .len();

        info!(
            owner = %owner,
            transactions,
            recurring,
            "Cleaned up owner rows"
        );
        Ok(transactions + recurring)
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, StoreError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| StoreError::Token("credential contains invalid header characters".into()))?;
    header.set_sensitive(true);
    Ok(header)
}
