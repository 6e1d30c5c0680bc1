//! Common types used across the workspace.

pub mod id;
pub mod pagination;

pub use id::OwnerId;
pub use pagination::{PageRequest, RowRange};
