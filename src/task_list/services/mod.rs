//! Application services for the session task list.

mod session;
mod store;

pub use session::{open_session, start_loading};
pub use store::{FetchOutcome, TaskListError, TaskListResult, TaskListSnapshot, TaskListStore};
