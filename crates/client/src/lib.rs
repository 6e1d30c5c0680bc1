//! REST client for the Tallyguard hosted store.
//!
//! Wraps the store's REST surface for the three caller roles (anonymous,
//! authenticated test user, privileged admin). The live suites under
//! `tests/` use it to exercise CRUD, recurring items, and owner isolation.
//!
//! # Modules
//!
//! - `client` - Role-bound connections and owner cleanup
//! - `query` - Filter, ordering, and range encoding plus terminal operations
//! - `claims` - Read-only bearer token inspection
//! - `error` - Store errors and rejection classification

pub mod claims;
pub mod client;
pub mod error;
pub mod query;

pub use claims::{BearerClaims, inspect_bearer};
pub use client::{
    CATEGORIES_TABLE, ClientRole, RECURRING_TABLE, StoreClient, TRANSACTIONS_TABLE,
};
pub use error::StoreError;
pub use query::{Filter, FilterOp, TableQuery};
pub use tallyguard_shared::TestIdentity;
