//! Diesel row models for todo persistence.

use super::schema::todos;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Todo label.
    pub name: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for todo records.
///
/// The identifier and creation timestamp come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo label.
    pub name: String,
    /// Initial completion flag.
    pub completed: bool,
}
