//! Core types for tui-todo
//!
//! This crate holds everything the todo application knows that is not
//! presentation:
//!
//! - **TodoList**: the ordered collection with positional operations
//! - **TodoStore**: session-scoped owner of the list, id allocation and
//!   change subscriptions
//! - **Filter**: All/Active/Completed projection over the collection
//! - **Action**: trait (and derive macro) for dispatchable user intents
//!
//! # Example
//!
//! ```
//! use todo_core::{Filter, TodoStore};
//!
//! let mut store = TodoStore::with_items([("Jog around the park", false)]);
//! store.create("Read for 1 hour", false).unwrap();
//! store.set_completed(1, true).unwrap();
//!
//! let active = Filter::Active.project(store.items());
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].title, "Read for 1 hour");
//! assert_eq!(store.clear_completed(), 1);
//! ```

pub mod action;
pub mod error;
pub mod filter;
pub mod store;
pub mod todo;

pub use action::{Action, ActionCategory};
pub use error::{Result, TodoError};
pub use filter::Filter;
pub use store::{Change, StoreEvent, SubscriptionId, TodoStore};
pub use todo::{TodoId, TodoItem, TodoList};

// Derive macro shares the trait's name, like serde's derives
pub use todo_macros::Action;
