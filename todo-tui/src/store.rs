//! Single-owner state container driven by a reducer
//!
//! All mutation of [`AppState`](crate::state::AppState) goes through
//! [`Store::dispatch`]; the main loop is the only caller.

use std::marker::PhantomData;

use todo_core::{Action, ActionCategory};

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Hooks run around every dispatched action
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer, with its render hint
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Logs every action with its name and category
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Also log when the action enters the store
    pub log_before: bool,
    dispatched: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self {
            log_before: true,
            dispatched: 0,
        }
    }

    /// Number of actions seen so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<A: ActionCategory> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        if self.log_before {
            tracing::trace!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(
            action = %action.name(),
            category = action.category().unwrap_or("none"),
            state_changed,
            "Action processed"
        );
    }
}

/// Redux-style store: owns the state, applies actions through one reducer
///
/// # Example
/// ```
/// use todo_tui::action::Action;
/// use todo_tui::reducer::reducer;
/// use todo_tui::state::AppState;
/// use todo_tui::store::Store;
///
/// let mut store = Store::new(AppState::default(), reducer);
/// let first = store.state().todos.items()[0].id;
/// assert!(store.dispatch(Action::TodoDelete(first)));
/// assert_eq!(store.state().todos.len(), 5);
/// ```
pub struct Store<S, A: Action, M: Middleware<A> = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: M,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, M: Middleware<A>> Store<S, A, M> {
    pub fn with_middleware(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    /// Run the action through middleware and the reducer.
    ///
    /// Returns `true` if a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Bypasses the reducer; for tests and setup only
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
