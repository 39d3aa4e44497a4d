//! Domain module
//!
//! Core domain types and business logic.

pub mod error;
pub mod patch;
pub mod todo;

pub use error::{FieldViolation, ValidationError};
pub use patch::TodoPatch;
pub use todo::{Order, State, Title, Todo, TodoId};
