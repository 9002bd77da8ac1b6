//! Domain model for the session task list.
//!
//! The domain owns the todo record, its validated scalars and the ordered
//! list invariants. Persistence and presentation concerns stay outside of
//! this boundary.

mod error;
mod ids;
mod list;
mod todo;

pub use error::TodoDomainError;
pub use ids::{TodoId, TodoLabel};
pub use list::TaskList;
pub use todo::{NewTodo, PersistedTodoData, Todo};
