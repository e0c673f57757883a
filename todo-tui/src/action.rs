//! Application actions

use todo_core::{Filter, TodoId};

/// Everything that can change [`AppState`](crate::state::AppState).
///
/// Todo items are addressed by id, never by on-screen row.
#[derive(todo_core::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Todos =====
    TodoToggle(TodoId),
    TodoDelete(TodoId),
    /// Move to an absolute collection position
    TodoMove { id: TodoId, to: usize },
    /// Swap the selected item with its visible neighbour
    TodoMoveUp,
    TodoMoveDown,
    TodoClearCompleted,

    // ===== Selection =====
    SelectionNext,
    SelectionPrev,
    SelectionFirst,
    SelectionLast,
    SelectionSet(TodoId),

    // ===== Filter =====
    FilterSet(Filter),
    FilterCycle,

    // ===== Create form =====
    InputFocus,
    InputBlur,
    InputChange(String),
    InputToggleCompleted,
    /// Carries the raw text; the reducer trims and validates it
    InputSubmit(String),

    // ===== Drag and drop =====
    DragStart(TodoId),
    DragOver(TodoId),
    DragDrop,
    DragCancel,

    // ===== UI =====
    ThemeToggle,
    UiResize(u16, u16),

    #[action(category = "app")]
    Quit,
}
