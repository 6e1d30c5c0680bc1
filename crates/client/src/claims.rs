//! Read-only inspection of bearer tokens.
//!
//! Tokens come from the external identity provider. The store verifies
//! them; the harness only peeks at the claims to fail fast on an expired or
//! anonymous token before a whole suite runs against it.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

use crate::error::StoreError;

/// Role claim carried by signed-in users.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// Claims the harness cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BearerClaims {
    /// Subject (owner id).
    #[serde(default)]
    pub sub: Option<String>,
    /// Database role the token maps to.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl BearerClaims {
    /// True if the token maps to the signed-in user role.
    #[must_use]
    pub fn is_authenticated_role(&self) -> bool {
        self.role.as_deref() == Some(AUTHENTICATED_ROLE)
    }

    /// Expiry instant, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// True if the token expired at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// Decodes the claims of `token` without checking its signature or expiry.
pub fn inspect_bearer(token: &str) -> Result<BearerClaims, StoreError> {
    let header = decode_header(token).map_err(|e| StoreError::Token(e.to_string()))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<BearerClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| StoreError::Token(e.to_string()))
}
