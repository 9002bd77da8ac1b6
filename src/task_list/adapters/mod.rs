//! Adapter implementations for task list ports.

pub mod memory;
pub mod postgres;
