//! Record store port for the `todos` collection.

use crate::task_list::domain::{NewTodo, Todo, TodoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;

/// Todo persistence contract.
///
/// Any backend offering these five operations satisfies the task list.
/// Credentials and connection settings belong to the implementation.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Returns every todo ordered by ascending identifier.
    async fn select_all(&self) -> TodoStoreResult<Vec<Todo>>;

    /// Inserts a new incomplete todo and returns the stored record with its
    /// assigned identifier.
    async fn insert(&self, todo: &NewTodo) -> TodoStoreResult<Todo>;

    /// Sets the completion flag of an existing todo and returns the updated
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::NotFound`] when the todo does not exist.
    async fn set_completed(&self, id: TodoId, completed: bool) -> TodoStoreResult<Todo>;

    /// Deletes a todo by identifier.
    ///
    /// Deleting an absent identifier succeeds without effect.
    async fn delete(&self, id: TodoId) -> TodoStoreResult<()>;

    /// Deletes every completed todo and returns how many were removed.
    async fn delete_completed(&self) -> TodoStoreResult<u64>;
}

/// Errors returned by todo store implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoStoreError {
    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
