//! Terminal front end for tui-todo
//!
//! Unidirectional data flow, one direction only:
//!
//! ```text
//! crossterm event -> TodoUi::map_event -> Action -> Store::dispatch -> reducer
//!                                                                  |
//!                         TodoUi::render <- AppState <-------------+
//! ```
//!
//! The collection itself lives in [`todo_core::TodoStore`] inside
//! [`state::AppState`]; the reducer is its only writer.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod event;
pub mod keybindings;
pub mod reducer;
pub mod state;
pub mod store;
pub mod testing;
pub mod theme;

pub use action::Action;
pub use app::TodoUi;
pub use state::AppState;
