//! Action traits for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a store
///
/// Actions describe user intents. They should be:
/// - Clone: actions may be logged or replayed
/// - Debug: for logging
/// - Send + 'static: actions travel over the runtime's channel
///
/// Use `#[derive(Action)]` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions grouped by name prefix
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
pub trait ActionCategory: Action {
    /// The category this action belongs to, if any
    fn category(&self) -> Option<&'static str>;
}
