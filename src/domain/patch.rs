//! Partial updates
//!
//! A `TodoPatch` holds the optionally-present fields of a PATCH request and
//! turns them into a single update function. Absent fields leave the todo
//! untouched; they never reset a field to a default.

use super::error::ValidationError;
use super::todo::{Order, Title, Todo};

/// Validated set of fields to change on an existing todo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    title: Option<Title>,
    order: Option<Order>,
    completed: Option<bool>,
}

impl TodoPatch {
    /// Build a patch from raw incoming fields.
    ///
    /// Every present-but-invalid field is reported in one error.
    pub fn from_fields(
        title: Option<String>,
        order: Option<i32>,
        completed: Option<bool>,
    ) -> Result<Self, ValidationError> {
        let title = title.map(Title::new).transpose();
        let order = order.map(Order::new).transpose();

        match (title, order) {
            (Ok(title), Ok(order)) => Ok(Self {
                title,
                order,
                completed,
            }),
            (title, order) => Err(ValidationError::collect([title.err(), order.err()])),
        }
    }

    /// True when applying the patch would leave a todo unchanged
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.order.is_none() && self.completed.is_none()
    }

    /// Apply title, then order, then completion to `todo`.
    pub fn apply(self, todo: Todo) -> Result<Todo, ValidationError> {
        let todo = match self.title {
            Some(title) => todo.with_title(title),
            None => todo,
        };
        let todo = match self.order {
            Some(order) => todo.with_order(order),
            None => todo,
        };
        match self.completed {
            Some(completed) => todo.with_completed(completed),
            None => Ok(todo),
        }
    }

    /// The composed update function, ready to hand to `TodoRepository::modify`.
    pub fn into_update(self) -> impl FnOnce(Todo) -> Result<Todo, ValidationError> + Send {
        move |todo| self.apply(todo)
    }
}
