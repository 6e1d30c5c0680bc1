//! Shared configuration, errors, and identifier types for Tallyguard.
//!
//! This crate provides common pieces used across all other crates:
//! - Store configuration loaded from files and environment
//! - Per-user test identities (owner id + bearer token)
//! - Typed owner identifiers
//! - Row ranges for paginated reads
//! - Application-wide error types

pub mod config;
pub mod error;
pub mod identity;
pub mod types;

pub use config::{StoreConfig, TestConfig};
pub use error::{AppError, AppResult};
pub use identity::TestIdentity;
