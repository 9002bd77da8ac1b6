//! Tasklist: a session-scoped todo list over a pluggable record store.
//!
//! This crate keeps the authoritative todo list for one user session and
//! exposes the operations a presentation layer needs: fetch, add, toggle,
//! remove and clear completed. Todos are persisted through a record store
//! port with in-memory and `PostgreSQL` implementations.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure todo and list types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the record store
//! - **Adapters**: Concrete store implementations (memory, database)
//!
//! # Modules
//!
//! - [`task_list`]: Todo domain, store port, adapters and the list service
//! - [`config`]: Environment-driven session settings

pub mod config;
pub mod task_list;
