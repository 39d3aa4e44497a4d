//! Todo entity
//!
//! Domain primitives and the `Todo` aggregate. All values are validated at
//! construction time, ensuring invalid todos cannot exist in the system.

use std::fmt;

use super::error::ValidationError;

/// Identifier assigned by the repository on persistence.
///
/// # Invariants
/// - Value is always positive (> 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::field("id", "id must be a positive value"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::field("title", "title cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-defined sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Order(i32);

impl Order {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::field("order", "order must be a positive value"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Lifecycle state of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Draft,
    Completed,
    NotCompleted,
}

impl State {
    pub fn is_draft(&self) -> bool {
        matches!(self, State::Draft)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, State::Completed)
    }

    fn from_completed(completed: bool) -> Self {
        if completed {
            State::Completed
        } else {
            State::NotCompleted
        }
    }
}

/// A todo item, either an unsaved draft or a persisted item.
///
/// # Invariants
/// - `state == Draft` iff `id` is absent
/// - `title` is never empty, `id` and `order` are positive when present
///
/// Values are immutable; the `with_*` operations return new todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: Option<TodoId>,
    title: Title,
    order: Option<Order>,
    state: State,
}

impl Todo {
    fn from_parts(
        id: Option<TodoId>,
        title: Title,
        order: Option<Order>,
        state: State,
    ) -> Result<Self, ValidationError> {
        match (state.is_draft(), id.is_some()) {
            (true, true) => Err(ValidationError::field("id", "draft cannot have an id")),
            (false, false) => Err(ValidationError::field("id", "todo cannot have an empty id")),
            _ => Ok(Self {
                id,
                title,
                order,
                state,
            }),
        }
    }

    /// Create a draft with no sort key.
    pub fn draft(title: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_parts(None, Title::new(title)?, None, State::Draft)
    }

    /// Create a draft with a sort key. Both fields are validated together.
    pub fn draft_with_order(title: impl Into<String>, order: i32) -> Result<Self, ValidationError> {
        match (Title::new(title), Order::new(order)) {
            (Ok(title), Ok(order)) => Self::from_parts(None, title, Some(order), State::Draft),
            (title, order) => Err(ValidationError::collect([title.err(), order.err()])),
        }
    }

    /// Rebuild a persisted todo from raw values.
    ///
    /// Every invalid field (id, title, order) is reported in one error.
    pub fn create(
        id: i64,
        title: impl Into<String>,
        order: Option<i32>,
        completed: bool,
    ) -> Result<Self, ValidationError> {
        let order = order.map(Order::new).transpose();

        match (TodoId::new(id), Title::new(title), order) {
            (Ok(id), Ok(title), Ok(order)) => {
                Self::from_parts(Some(id), title, order, State::from_completed(completed))
            }
            (id, title, order) => Err(ValidationError::collect([id.err(), title.err(), order.err()])),
        }
    }

    /// Attach the identifier assigned at persistence time.
    pub fn with_id(self, id: TodoId) -> Self {
        Self {
            id: Some(id),
            state: State::NotCompleted,
            ..self
        }
    }

    pub fn with_title(self, title: Title) -> Self {
        Self { title, ..self }
    }

    pub fn with_order(self, order: Order) -> Self {
        Self {
            order: Some(order),
            ..self
        }
    }

    /// Mark as completed or not. Drafts cannot be completed.
    pub fn with_completed(self, completed: bool) -> Result<Self, ValidationError> {
        let Self {
            id, title, order, ..
        } = self;
        Self::from_parts(id, title, order, State::from_completed(completed))
            .map_err(|_| ValidationError::field("completed", "draft cannot change its completion state"))
    }

    pub fn id(&self) -> Option<TodoId> {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn order(&self) -> Option<Order> {
        self.order
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_draft(&self) -> bool {
        self.state.is_draft()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i64) -> TodoId {
        TodoId::new(value).unwrap()
    }

    #[test]
    fn test_primitives_reject_non_positive_values() {
        assert!(TodoId::new(0).is_err());
        assert!(TodoId::new(-5).is_err());
        assert!(Order::new(0).is_err());
        assert!(Title::new("").is_err());

        assert_eq!(TodoId::new(7).unwrap().value(), 7);
        assert_eq!(Order::new(3).unwrap().value(), 3);
        assert_eq!(Title::new("buy milk").unwrap().as_str(), "buy milk");
    }

    #[test]
    fn test_draft_has_no_id() {
        let todo = Todo::draft("write tests").unwrap();
        assert!(todo.id().is_none());
        assert_eq!(todo.state(), State::Draft);
        assert!(todo.order().is_none());
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_draft_with_order() {
        for (title, order) in [("a", 1), ("some title", 42), ("x", i32::MAX)] {
            let todo = Todo::draft_with_order(title, order).unwrap();
            assert!(todo.id().is_none());
            assert_eq!(todo.state(), State::Draft);
            assert_eq!(todo.title().as_str(), title);
            assert_eq!(todo.order().map(|o| o.value()), Some(order));
        }
    }

    #[test]
    fn test_draft_rejects_empty_title() {
        let err = Todo::draft("").unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
    }

    #[test]
    fn test_draft_with_order_reports_both_fields() {
        let err = Todo::draft_with_order("", 0).unwrap_err();
        assert_eq!(err.fields(), vec!["title", "order"]);
    }

    #[test]
    fn test_create_sets_state_from_completed() {
        let done = Todo::create(1, "done", Some(2), true).unwrap();
        assert_eq!(done.state(), State::Completed);
        assert_eq!(done.id(), Some(id(1)));

        let open = Todo::create(2, "open", None, false).unwrap();
        assert_eq!(open.state(), State::NotCompleted);
        assert!(open.order().is_none());
    }

    #[test]
    fn test_create_reports_every_invalid_field() {
        let err = Todo::create(-1, "", Some(-1), true).unwrap_err();
        assert_eq!(err.fields(), vec!["id", "title", "order"]);
    }

    #[test]
    fn test_create_reports_single_invalid_field() {
        let err = Todo::create(3, "ok", Some(0), false).unwrap_err();
        assert_eq!(err.fields(), vec!["order"]);
    }

    #[test]
    fn test_with_id_transitions_draft() {
        let draft = Todo::draft_with_order("title", 4).unwrap();
        let saved = draft.clone().with_id(id(10));

        assert_eq!(saved.id(), Some(id(10)));
        assert_eq!(saved.state(), State::NotCompleted);
        assert_eq!(saved.title(), draft.title());
        assert_eq!(saved.order(), draft.order());
    }

    #[test]
    fn test_with_id_is_idempotent() {
        let once = Todo::draft("title").unwrap().with_id(id(3));
        let twice = once.clone().with_id(id(3));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_with_id_resets_completion() {
        let todo = Todo::create(1, "title", None, true).unwrap().with_id(id(1));
        assert_eq!(todo.state(), State::NotCompleted);
    }

    #[test]
    fn test_with_title_and_order_touch_one_field() {
        let todo = Todo::create(5, "a", Some(1), true).unwrap();

        let retitled = todo.clone().with_title(Title::new("b").unwrap());
        assert_eq!(retitled.title().as_str(), "b");
        assert_eq!(retitled.id(), todo.id());
        assert_eq!(retitled.order(), todo.order());
        assert_eq!(retitled.state(), State::Completed);

        let reordered = todo.clone().with_order(Order::new(9).unwrap());
        assert_eq!(reordered.order().map(|o| o.value()), Some(9));
        assert_eq!(reordered.title(), todo.title());
        assert_eq!(reordered.state(), State::Completed);
    }

    #[test]
    fn test_with_completed() {
        let todo = Todo::create(5, "a", None, false).unwrap();
        let done = todo.clone().with_completed(true).unwrap();
        assert_eq!(done.state(), State::Completed);
        assert_eq!(done.id(), todo.id());

        let reopened = done.with_completed(false).unwrap();
        assert_eq!(reopened, todo);
    }

    #[test]
    fn test_draft_cannot_be_completed() {
        let err = Todo::draft("a").unwrap().with_completed(true).unwrap_err();
        assert_eq!(err.fields(), vec!["completed"]);
    }
}
