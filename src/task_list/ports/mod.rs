//! Port contracts for the task list.
//!
//! Ports define infrastructure-agnostic interfaces used by task list
//! services.

pub mod store;

pub use store::{TodoStore, TodoStoreError, TodoStoreResult};
