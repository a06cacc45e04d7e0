//! Root view: the todo list as plain text.

use std::io::{self, Write};

use todo_core::{TodoApi, TodoEntry, Transport};

/// Root component of the terminal front end. Owns the API handle the
/// mounted app uses for every request.
#[derive(Debug, Clone)]
pub struct TodoView<T> {
    api: TodoApi<T>,
}

impl<T: Transport> TodoView<T> {
    pub fn new(api: TodoApi<T>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &TodoApi<T> {
        &self.api
    }

    pub fn render(&self, todos: &[TodoEntry], out: &mut impl Write) -> io::Result<()> {
        if todos.is_empty() {
            writeln!(out, "no todos")?;
            return Ok(());
        }
        for todo in todos {
            let mark = if todo.done { 'x' } else { ' ' };
            writeln!(out, "[{mark}] {:>3}  {}", todo.id, todo.title)?;
            if let Some(description) = &todo.description {
                writeln!(out, "         {description}")?;
            }
        }
        Ok(())
    }
}
