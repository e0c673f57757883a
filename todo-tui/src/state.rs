//! Application state

use todo_core::{Filter, TodoError, TodoId, TodoItem, TodoStore};

use crate::theme::ThemeMode;

/// Items a fresh session starts with
pub const SAMPLE_TODOS: [(&str, bool); 6] = [
    ("Complete online JavaScript course", true),
    ("Jog around the park 3x", false),
    ("10 minutes meditation", false),
    ("Read for 1 hour", false),
    ("Pick up groceries", false),
    ("Complete Todo App on Frontend Mentor", false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    /// The create form has keyboard focus
    Input,
}

/// An in-progress mouse drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub source: TodoId,
    /// Row currently under the pointer, if any
    pub target: Option<TodoId>,
}

/// One-line message shown in the footer until the next action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Error(s) => s,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub todos: TodoStore,
    pub filter: Filter,
    pub focus: Focus,
    /// Always a visible item or `None`
    pub selected: Option<TodoId>,
    pub draft: String,
    /// State of the create form's checkbox
    pub draft_completed: bool,
    pub theme: ThemeMode,
    pub drag: Option<DragState>,
    pub status: Option<Status>,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TodoStore::with_items(SAMPLE_TODOS))
    }
}

impl AppState {
    /// State around an existing store; the first item starts selected
    pub fn new(todos: TodoStore) -> Self {
        let selected = todos.items().first().map(|item| item.id);
        Self {
            todos,
            filter: Filter::All,
            focus: Focus::List,
            selected,
            draft: String::new(),
            draft_completed: false,
            theme: ThemeMode::default(),
            drag: None,
            status: None,
            terminal_size: (80, 24),
        }
    }

    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self.repair_selection(0);
        self
    }

    pub fn visible(&self) -> Vec<&TodoItem> {
        self.filter.project(self.todos.items())
    }

    pub fn visible_ids(&self) -> Vec<TodoId> {
        self.visible().into_iter().map(|item| item.id).collect()
    }

    /// Row of the selection within the current filter
    pub fn selected_row(&self) -> Option<usize> {
        let selected = self.selected?;
        self.visible().iter().position(|item| item.id == selected)
    }

    pub fn is_visible(&self, id: TodoId) -> bool {
        self.todos
            .get(id)
            .is_some_and(|item| self.filter.matches(item))
    }

    /// Re-establish "selection is visible or None".
    ///
    /// `preferred_row` is where the selection was before the change; the
    /// nearest remaining visible row at or above it wins.
    pub fn repair_selection(&mut self, preferred_row: usize) {
        if self.selected.is_some_and(|id| self.is_visible(id)) {
            return;
        }
        let visible = self.visible_ids();
        self.selected = visible
            .get(preferred_row)
            .or_else(|| visible.last())
            .copied();
    }

    pub fn report(&mut self, err: TodoError) {
        tracing::debug!(error = %err, "Showing store error");
        self.status = Some(Status::Error(err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_state_is_seeded() {
        let state = AppState::default();
        assert_eq!(state.todos.len(), 6);
        assert!(state.todos.items()[0].completed);
        assert_eq!(state.todos.items_left(), 5);
        assert_eq!(state.selected, Some(state.todos.items()[0].id));
        assert_eq!(state.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_empty_store_has_no_selection() {
        let state = AppState::new(TodoStore::new());
        assert_eq!(state.selected, None);
        assert_eq!(state.selected_row(), None);
    }

    #[test]
    fn test_with_filter_moves_selection_into_view() {
        let state = AppState::default().with_filter(Filter::Active);
        let first_active = state.todos.items()[1].id;
        assert_eq!(state.selected, Some(first_active));
        assert_eq!(state.selected_row(), Some(0));
    }

    #[test]
    fn test_repair_selection_prefers_same_row() {
        let mut state = AppState::default();
        let ids = state.visible_ids();
        state.selected = Some(ids[2]);
        state.todos.remove_id(ids[2]).unwrap();

        state.repair_selection(2);
        assert_eq!(state.selected, Some(ids[3]));
    }

    #[test]
    fn test_repair_selection_falls_back_to_last_row() {
        let mut state = AppState::default();
        let ids = state.visible_ids();
        state.selected = Some(ids[5]);
        state.todos.remove_id(ids[5]).unwrap();

        state.repair_selection(5);
        assert_eq!(state.selected, Some(ids[4]));
    }

    #[test]
    fn test_report_sets_error_status() {
        let mut state = AppState::default();
        state.report(TodoError::UnknownId(TodoId(99)));
        assert!(matches!(state.status, Some(Status::Error(_))));
    }
}
