//! Ordered todo collection with unique identifiers.

use super::{Todo, TodoId};

/// Ordered sequence of todos keyed by identifier.
///
/// No two entries share an identifier. Entries loaded from a store keep the
/// store's ascending-id order; appended entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    todos: Vec<Todo>,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// Builds a list from todos in the given order.
    ///
    /// Later duplicates of an identifier replace the earlier entry in place.
    #[must_use]
    pub fn from_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let mut list = Self::new();
        for todo in todos {
            list.upsert(todo);
        }
        list
    }

    /// Returns the number of todos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns `true` when the list holds no todos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the todos in list order.
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    /// Iterates the todos in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// Finds a todo by identifier.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id() == id)
    }

    /// Returns `true` when a todo with the identifier is present.
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a todo, or replaces the existing entry with the same
    /// identifier without moving it.
    pub fn upsert(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|existing| existing.id() == todo.id()) {
            Some(existing) => *existing = todo,
            None => self.todos.push(todo),
        }
    }

    /// Sets the completion flag of a todo.
    ///
    /// Returns the updated todo, or `None` when the identifier is absent.
    pub fn set_completed(&mut self, id: TodoId, completed: bool) -> Option<&Todo> {
        let todo = self.todos.iter_mut().find(|todo| todo.id() == id)?;
        todo.set_completed(completed);
        Some(todo)
    }

    /// Removes a todo by identifier, returning it when present.
    pub fn remove(&mut self, id: TodoId) -> Option<Todo> {
        let position = self.todos.iter().position(|todo| todo.id() == id)?;
        Some(self.todos.remove(position))
    }

    /// Drops every completed todo and returns how many were removed.
    pub fn retain_incomplete(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| !todo.is_completed());
        before - self.todos.len()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
