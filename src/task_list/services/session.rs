//! Session bootstrap choosing the persisted or local task list.

use super::store::{TaskListResult, TaskListStore};
use crate::config::TaskListConfig;
use crate::task_list::{
    adapters::{memory::InMemoryTodoStore, postgres::PostgresTodoStore},
    ports::TodoStore,
};
use mockable::DefaultClock;
use std::sync::Arc;
use tracing::{debug, info};

/// Opens a task list session for the given configuration.
///
/// With a database configured, the `PostgreSQL` store is connected, its
/// schema ensured, and the initial fetch run. A failed initial fetch leaves
/// an empty, no longer loading list. Without a database, the session runs
/// against an in-memory store seeded with two sample todos.
///
/// # Errors
///
/// Returns [`super::TaskListError::Store`] when the database pool cannot be
/// built or the schema cannot be created.
pub async fn open_session(config: &TaskListConfig) -> TaskListResult<TaskListStore<dyn TodoStore>> {
    let Some(database) = config.database() else {
        let store = Arc::new(InMemoryTodoStore::with_sample_todos(Arc::new(DefaultClock)));
        let todos = store.todos()?;
        info!(count = todos.len(), "opened local task list session");
        let store: Arc<dyn TodoStore> = store;
        return Ok(TaskListStore::preloaded(store, todos, config));
    };

    let store = PostgresTodoStore::connect(database).await?;
    store.ensure_schema().await?;
    let store: Arc<dyn TodoStore> = Arc::new(store);
    Ok(start_loading(store, config).await)
}

/// Creates a list over `store` and runs its initial fetch.
///
/// A failed fetch is reported once, by [`TaskListStore::fetch_all`], and
/// leaves the list empty and no longer loading.
pub async fn start_loading<S>(store: Arc<S>, config: &TaskListConfig) -> TaskListStore<S>
where
    S: TodoStore + ?Sized,
{
    let list = TaskListStore::new(store, config);
    if list.fetch_all().await.is_err() {
        debug!("starting with an empty list after the failed initial fetch");
    }
    info!(
        count = list.snapshot().todos().len(),
        "opened persisted task list session"
    );
    list
}
