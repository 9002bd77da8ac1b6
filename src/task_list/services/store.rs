//! Session-scoped task list over a [`TodoStore`].
//!
//! The store owns the authoritative list for one session. Every mutation
//! goes to the record store first and is applied locally once the store
//! confirms it, except for `clear_completed` under
//! [`ClearCompletedPolicy::Optimistic`]. Snapshots are published through a
//! `watch` channel so the presentation layer only ever reads copies.
//!
//! Operations take `&self` and may run concurrently. No lock is held across
//! a store call, so responses apply in arrival order. Mutations are keyed by
//! identifier and commute; a fetch that races a mutation is detected through
//! the snapshot revision and read again.

use crate::config::{ClearCompletedPolicy, TaskListConfig};
use crate::task_list::{
    domain::{NewTodo, TaskList, Todo, TodoId, TodoLabel},
    ports::{TodoStore, TodoStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Service-level errors for task list operations.
#[derive(Debug, Error)]
pub enum TaskListError {
    /// The record store rejected the operation.
    #[error(transparent)]
    Store(#[from] TodoStoreError),
}

/// Result type for task list operations.
pub type TaskListResult<T> = Result<T, TaskListError>;

/// Immutable view of the task list published to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListSnapshot {
    todos: TaskList,
    loading: bool,
    draft: String,
    revision: u64,
}

impl TaskListSnapshot {
    /// Returns the todos in display order.
    #[must_use]
    pub const fn todos(&self) -> &TaskList {
        &self.todos
    }

    /// Returns `true` until the initial fetch settles.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the pending input text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the number of local mutations applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

/// Result of a successful [`TaskListStore::fetch_all`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The first read replaced the local list.
    Applied {
        /// Number of todos now in the list.
        count: usize,
    },
    /// Local changes landed while earlier reads were in flight; a later read
    /// replaced the local list.
    Reread {
        /// Number of todos now in the list.
        count: usize,
        /// Number of store reads issued, including the applied one.
        reads: usize,
    },
}

/// Authoritative task list for one session.
pub struct TaskListStore<S>
where
    S: TodoStore + ?Sized,
{
    store: Arc<S>,
    clear_policy: ClearCompletedPolicy,
    state: watch::Sender<TaskListSnapshot>,
}

impl<S> TaskListStore<S>
where
    S: TodoStore + ?Sized,
{
    /// Creates an empty list waiting for its initial [`fetch_all`].
    ///
    /// [`fetch_all`]: Self::fetch_all
    #[must_use]
    pub fn new(store: Arc<S>, config: &TaskListConfig) -> Self {
        let initial = TaskListSnapshot {
            loading: true,
            ..TaskListSnapshot::default()
        };
        Self::with_snapshot(store, config, initial)
    }

    /// Creates a list that starts from known todos and needs no fetch.
    #[must_use]
    pub fn preloaded(
        store: Arc<S>,
        todos: impl IntoIterator<Item = Todo>,
        config: &TaskListConfig,
    ) -> Self {
        let initial = TaskListSnapshot {
            todos: TaskList::from_todos(todos),
            ..TaskListSnapshot::default()
        };
        Self::with_snapshot(store, config, initial)
    }

    fn with_snapshot(store: Arc<S>, config: &TaskListConfig, initial: TaskListSnapshot) -> Self {
        Self {
            store,
            clear_policy: config.clear_policy(),
            state: watch::Sender::new(initial),
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver observes a new value after every applied change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TaskListSnapshot> {
        self.state.subscribe()
    }

    /// Returns the configured clear-completed policy.
    #[must_use]
    pub const fn clear_policy(&self) -> ClearCompletedPolicy {
        self.clear_policy
    }

    /// Replaces the pending input text.
    pub fn set_draft(&self, draft: impl Into<String>) {
        let draft = draft.into();
        self.state.send_if_modified(|state| {
            if state.draft == draft {
                return false;
            }
            state.draft = draft;
            true
        });
    }

    /// Loads every todo from the store, replacing the local list.
    ///
    /// A read that overlaps a local change is discarded and the store is
    /// read again, so the applied list always reflects every confirmed
    /// mutation. The loading flag is cleared once a read is applied or the
    /// store fails. On failure the previous list is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when a store read fails.
    pub async fn fetch_all(&self) -> TaskListResult<FetchOutcome> {
        let mut reads = 0_usize;
        loop {
            let started_at = self.state.borrow().revision;
            reads += 1;
            debug!(reads, "fetching todos");

            let todos = match self.store.select_all().await {
                Ok(todos) => todos,
                Err(err) => {
                    self.state.send_if_modified(|state| {
                        let was_loading = state.loading;
                        state.loading = false;
                        was_loading
                    });
                    return Err(report("fetch_all", err));
                }
            };

            let mut applied = None;
            self.state.send_if_modified(|state| {
                if state.revision != started_at {
                    return false;
                }
                state.todos = TaskList::from_todos(todos);
                state.loading = false;
                applied = Some(state.todos.len());
                true
            });

            if let Some(count) = applied {
                debug!(count, reads, "loaded todos");
                return Ok(if reads == 1 {
                    FetchOutcome::Applied { count }
                } else {
                    FetchOutcome::Reread { count, reads }
                });
            }
            debug!("local change landed during fetch; reading todos again");
        }
    }

    /// Creates a todo with the given label and appends it to the list.
    ///
    /// Blank labels are ignored without contacting the store and yield
    /// `Ok(None)`. On success the pending input text is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store rejects the insert;
    /// the list and input text are left unchanged.
    pub async fn add(&self, label: &str) -> TaskListResult<Option<Todo>> {
        let Ok(name) = TodoLabel::new(label) else {
            debug!("ignoring blank todo label");
            return Ok(None);
        };

        let created = self
            .store
            .insert(&NewTodo::new(name))
            .await
            .map_err(|err| report("add", err))?;

        self.state.send_modify(|state| {
            state.todos.upsert(created.clone());
            state.draft.clear();
            state.revision += 1;
        });
        debug!(todo_id = %created.id(), "added todo");
        Ok(Some(created))
    }

    /// Submits the pending input text as a new todo.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store rejects the insert.
    pub async fn submit(&self) -> TaskListResult<Option<Todo>> {
        let draft = self.state.borrow().draft.clone();
        self.add(&draft).await
    }

    /// Flips the completion flag of a todo.
    ///
    /// Unknown identifiers are ignored without contacting the store and
    /// yield `Ok(None)`. The local flag is set to the value sent to the
    /// store, so a late response never flips it twice.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store rejects the update;
    /// the local flag is left unchanged.
    pub async fn toggle(&self, id: TodoId) -> TaskListResult<Option<Todo>> {
        let Some(requested) = self
            .state
            .borrow()
            .todos
            .get(id)
            .map(|todo| !todo.is_completed())
        else {
            debug!(todo_id = %id, "ignoring toggle of unknown todo");
            return Ok(None);
        };

        self.store
            .set_completed(id, requested)
            .await
            .map_err(|err| report("toggle", err))?;

        let mut updated = None;
        self.state.send_if_modified(|state| {
            updated = state.todos.set_completed(id, requested).cloned();
            if updated.is_some() {
                state.revision += 1;
            }
            updated.is_some()
        });
        debug!(todo_id = %id, completed = requested, "toggled todo");
        Ok(updated)
    }

    /// Deletes a todo.
    ///
    /// Returns `true` when the todo was present locally and has been
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store rejects the delete;
    /// the list is left unchanged.
    pub async fn remove(&self, id: TodoId) -> TaskListResult<bool> {
        self.store
            .delete(id)
            .await
            .map_err(|err| report("remove", err))?;

        let removed = self.state.send_if_modified(|state| {
            let removed = state.todos.remove(id).is_some();
            if removed {
                state.revision += 1;
            }
            removed
        });
        debug!(todo_id = %id, removed, "removed todo");
        Ok(removed)
    }

    /// Deletes every completed todo.
    ///
    /// Returns how many todos left the local list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store rejects the delete.
    /// Under [`ClearCompletedPolicy::Pessimistic`] the list is then left
    /// unchanged; under [`ClearCompletedPolicy::Optimistic`] the completed
    /// todos are dropped locally anyway.
    pub async fn clear_completed(&self) -> TaskListResult<usize> {
        match self.store.delete_completed().await {
            Ok(deleted) => {
                let dropped = self.drop_completed();
                debug!(deleted, dropped, "cleared completed todos");
                Ok(dropped)
            }
            Err(err) => {
                let error = report("clear_completed", err);
                if self.clear_policy == ClearCompletedPolicy::Optimistic {
                    let dropped = self.drop_completed();
                    warn!(dropped, "dropped completed todos locally after store failure");
                }
                Err(error)
            }
        }
    }

    fn drop_completed(&self) -> usize {
        let mut dropped = 0;
        self.state.send_if_modified(|state| {
            dropped = state.todos.retain_incomplete();
            if dropped > 0 {
                state.revision += 1;
            }
            dropped > 0
        });
        dropped
    }
}

fn report(operation: &'static str, err: TodoStoreError) -> TaskListError {
    warn!(operation, error = %err, "todo store call failed");
    TaskListError::Store(err)
}
