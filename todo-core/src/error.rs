//! Errors raised by the todo collection

use thiserror::Error;

use crate::todo::TodoId;

/// Failure of a collection operation.
///
/// A failed operation never modifies the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// The index does not address a current item
    #[error("index {index} out of range for {len} item(s)")]
    OutOfRange { index: usize, len: usize },

    /// Rejected input, e.g. a blank title
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No item carries this id
    #[error("no todo with id {0}")]
    UnknownId(TodoId),
}

/// Result alias for collection operations
pub type Result<T> = std::result::Result<T, TodoError>;
