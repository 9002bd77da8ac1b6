//! `PostgreSQL` store implementation for the `todos` table.

use super::{
    models::{NewTodoRow, TodoRow},
    schema::todos,
};
use crate::config::DatabaseConfig;
use crate::task_list::{
    domain::{NewTodo, PersistedTodoData, Todo, TodoId, TodoLabel},
    ports::{TodoStore, TodoStoreError, TodoStoreResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// SQL that creates the `todos` table when it does not exist yet.
pub const CREATE_TODOS_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_todos/up.sql");

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo store.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool from database settings and wraps it in a
    /// store.
    ///
    /// The pool opens its first connections eagerly, so it is built on the
    /// blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] when the pool cannot be
    /// built within the configured connection timeout.
    pub async fn connect(config: &DatabaseConfig) -> TodoStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.url());
        let builder = Pool::builder()
            .max_size(config.pool_max_size())
            .connection_timeout(config.connect_timeout());
        let pool = tokio::task::spawn_blocking(move || builder.build(manager))
            .await
            .map_err(TodoStoreError::persistence)?
            .map_err(TodoStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the `todos` table when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] when the statement fails.
    pub async fn ensure_schema(&self) -> TodoStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TODOS_SQL)
                .map_err(TodoStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoStoreError::persistence)?
    }
}

#[async_trait]
impl TodoStore for PostgresTodoStore {
    async fn select_all(&self) -> TodoStoreResult<Vec<Todo>> {
        self.run_blocking(|connection| {
            let rows = todos::table
                .order(todos::id.asc())
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)
                .map_err(TodoStoreError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }

    async fn insert(&self, todo: &NewTodo) -> TodoStoreResult<Todo> {
        let new_row = to_new_row(todo);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(todos::table)
                .values(&new_row)
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .map_err(TodoStoreError::persistence)?;
            row_to_todo(row)
        })
        .await
    }

    async fn set_completed(&self, id: TodoId, completed: bool) -> TodoStoreResult<Todo> {
        self.run_blocking(move |connection| {
            let row = diesel::update(todos::table.find(id.value()))
                .set(todos::completed.eq(completed))
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .optional()
                .map_err(TodoStoreError::persistence)?;
            row.ok_or(TodoStoreError::NotFound(id))
                .and_then(row_to_todo)
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> TodoStoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(todos::table.find(id.value()))
                .execute(connection)
                .map_err(TodoStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete_completed(&self) -> TodoStoreResult<u64> {
        self.run_blocking(|connection| {
            let removed = diesel::delete(todos::table.filter(todos::completed.eq(true)))
                .execute(connection)
                .map_err(TodoStoreError::persistence)?;
            u64::try_from(removed).map_err(TodoStoreError::persistence)
        })
        .await
    }
}

fn to_new_row(todo: &NewTodo) -> NewTodoRow {
    NewTodoRow {
        name: todo.name().as_str().to_owned(),
        completed: todo.completed(),
    }
}

fn row_to_todo(row: TodoRow) -> TodoStoreResult<Todo> {
    let TodoRow {
        id,
        name,
        completed,
        created_at,
    } = row;

    let data = PersistedTodoData {
        id: TodoId::new(id).map_err(TodoStoreError::persistence)?,
        name: TodoLabel::new(name).map_err(TodoStoreError::persistence)?,
        completed,
        created_at,
    };
    Ok(Todo::from_persisted(data))
}
