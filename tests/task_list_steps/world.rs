//! Shared world state for task list BDD scenarios.

use rstest::fixture;
use tasklist::task_list::{domain::TodoId, ports::TodoStore, services::TaskListStore};

/// Scenario world for task list behaviour tests.
#[derive(Default)]
pub struct TaskListWorld {
    pub list: Option<TaskListStore<dyn TodoStore>>,
}

impl TaskListWorld {
    /// Returns the opened session or an error when no session was opened.
    pub fn list(&self) -> Result<&TaskListStore<dyn TodoStore>, eyre::Report> {
        self.list
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task list session in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskListWorld {
    TaskListWorld::default()
}

/// Converts a step-captured number into a todo identifier.
pub fn todo_id(raw: u64) -> Result<TodoId, eyre::Report> {
    let value = i64::try_from(raw)?;
    Ok(TodoId::new(value)?)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
