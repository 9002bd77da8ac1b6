//! Todo record and creation payload.

use super::{TodoId, TodoLabel};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Creation payload sent to a todo store.
///
/// New todos always start incomplete; the store assigns the identifier and
/// the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    name: TodoLabel,
}

impl NewTodo {
    /// Creates a payload for an incomplete todo with the given label.
    #[must_use]
    pub const fn new(name: TodoLabel) -> Self {
        Self { name }
    }

    /// Returns the requested label.
    #[must_use]
    pub const fn name(&self) -> &TodoLabel {
        &self.name
    }

    /// Returns the initial completion flag, which is always `false`.
    #[must_use]
    pub const fn completed(&self) -> bool {
        false
    }
}

/// One item in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    name: TodoLabel,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted todo identifier.
    pub id: TodoId,
    /// Persisted label.
    pub name: TodoLabel,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo from a creation payload and a store-assigned
    /// identifier, stamping the creation time from `clock`.
    #[must_use]
    pub fn new(id: TodoId, payload: &NewTodo, clock: &impl Clock) -> Self {
        Self {
            id,
            name: payload.name().clone(),
            completed: payload.completed(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the todo label.
    #[must_use]
    pub const fn name(&self) -> &TodoLabel {
        &self.name
    }

    /// Returns whether the todo is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the completion flag.
    pub const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
