//! In-memory todo store used for local sessions and tests.
//!
//! Identifiers are derived from the clock's millisecond timestamp and bumped
//! so that they stay strictly increasing even when several todos are created
//! within the same millisecond.

use crate::task_list::{
    domain::{NewTodo, PersistedTodoData, Todo, TodoId, TodoLabel},
    ports::{TodoStore, TodoStoreError, TodoStoreResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Labels seeded into a local session.
const SAMPLE_LABELS: [&str; 2] = ["Todo1", "Todo2"];

/// Thread-safe in-memory todo store.
#[derive(Debug)]
pub struct InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    state: RwLock<InMemoryTodoState>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    todos: BTreeMap<TodoId, Todo>,
    last_id: i64,
}

impl<C> InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            state: RwLock::new(InMemoryTodoState::default()),
        }
    }

    /// Creates a store seeded with the two sample todos `Todo1` and `Todo2`
    /// under identifiers 1 and 2.
    #[must_use]
    pub fn with_sample_todos(clock: Arc<C>) -> Self {
        let created_at = clock.utc();
        let mut state = InMemoryTodoState::default();
        for (raw_id, label) in (1_i64..).zip(SAMPLE_LABELS) {
            let (Ok(id), Ok(name)) = (TodoId::new(raw_id), TodoLabel::new(label)) else {
                continue;
            };
            let todo = Todo::from_persisted(PersistedTodoData {
                id,
                name,
                completed: false,
                created_at,
            });
            state.todos.insert(id, todo);
            state.last_id = raw_id;
        }
        Self {
            clock,
            state: RwLock::new(state),
        }
    }

    /// Returns a copy of the stored todos ordered by ascending identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn todos(&self) -> TodoStoreResult<Vec<Todo>> {
        let state = self.read()?;
        Ok(state.todos.values().cloned().collect())
    }

    fn read(&self) -> TodoStoreResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoStoreResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTodoState {
    fn next_id(&mut self, now_millis: i64) -> TodoStoreResult<TodoId> {
        let following = self.last_id.checked_add(1).ok_or_else(|| {
            TodoStoreError::persistence(std::io::Error::other("todo identifiers exhausted"))
        })?;
        let candidate = now_millis.max(following);
        let id = TodoId::new(candidate).map_err(TodoStoreError::persistence)?;
        self.last_id = candidate;
        Ok(id)
    }
}

#[async_trait]
impl<C> TodoStore for InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    async fn select_all(&self) -> TodoStoreResult<Vec<Todo>> {
        self.todos()
    }

    async fn insert(&self, todo: &NewTodo) -> TodoStoreResult<Todo> {
        let now_millis = self.clock.utc().timestamp_millis();
        let mut state = self.write()?;
        let id = state.next_id(now_millis)?;
        let stored = Todo::new(id, todo, &*self.clock);
        state.todos.insert(id, stored.clone());
        Ok(stored)
    }

    async fn set_completed(&self, id: TodoId, completed: bool) -> TodoStoreResult<Todo> {
        let mut state = self.write()?;
        let todo = state
            .todos
            .get_mut(&id)
            .ok_or(TodoStoreError::NotFound(id))?;
        todo.set_completed(completed);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> TodoStoreResult<()> {
        let mut state = self.write()?;
        state.todos.remove(&id);
        Ok(())
    }

    async fn delete_completed(&self) -> TodoStoreResult<u64> {
        let mut state = self.write()?;
        let before = state.todos.len();
        state.todos.retain(|_, todo| !todo.is_completed());
        let removed = before - state.todos.len();
        u64::try_from(removed).map_err(TodoStoreError::persistence)
    }
}
