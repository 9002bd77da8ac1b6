//! Session task list management.
//!
//! This module holds one session's ordered todo list and the operations
//! that mutate it: fetching, adding, toggling, removing and clearing
//! completed todos against a record store. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
