//! Reducer - handles all state transitions

use todo_core::{Filter, TodoId};

use crate::action::Action;
use crate::state::{AppState, DragState, Focus, Status};

pub const EMPTY_TITLE_MESSAGE: &str = "Title cannot be empty";

/// Apply one action; returns whether the screen needs a redraw
pub fn reducer(state: &mut AppState, action: Action) -> bool {
    // A status message lives until the next user intent
    let cleared_status = match &action {
        Action::UiResize(..) | Action::DragOver(_) => false,
        _ => state.status.take().is_some(),
    };

    let changed = match action {
        // ===== Todos =====
        Action::TodoToggle(id) => {
            let row = state.selected_row().unwrap_or(0);
            match state.todos.toggle_id(id) {
                Ok(_) => state.repair_selection(row),
                Err(e) => state.report(e),
            }
            true
        }

        Action::TodoDelete(id) => {
            let row = row_of(state, id).or(state.selected_row()).unwrap_or(0);
            match state.todos.remove_id(id) {
                Ok(_) => state.repair_selection(row),
                Err(e) => state.report(e),
            }
            true
        }

        Action::TodoMove { id, to } => {
            if let Err(e) = state.todos.move_id(id, to) {
                state.report(e);
            }
            true
        }

        Action::TodoMoveUp => move_selected(state, -1),
        Action::TodoMoveDown => move_selected(state, 1),

        Action::TodoClearCompleted => {
            let row = state.selected_row().unwrap_or(0);
            let removed = state.todos.clear_completed();
            if removed > 0 {
                state.repair_selection(row);
                state.status = Some(Status::Info(format!(
                    "Cleared {removed} completed item{}",
                    if removed == 1 { "" } else { "s" }
                )));
                true
            } else {
                false
            }
        }

        // ===== Selection =====
        Action::SelectionNext => step_selection(state, 1),
        Action::SelectionPrev => step_selection(state, -1),
        Action::SelectionFirst => select_row(state, |_| Some(0)),
        Action::SelectionLast => select_row(state, |len| len.checked_sub(1)),
        Action::SelectionSet(id) => {
            if state.is_visible(id) && state.selected != Some(id) {
                state.selected = Some(id);
                true
            } else {
                false
            }
        }

        // ===== Filter =====
        Action::FilterSet(filter) => set_filter(state, filter),
        Action::FilterCycle => {
            let next = state.filter.next();
            set_filter(state, next)
        }

        // ===== Create form =====
        Action::InputFocus => {
            let changed = state.focus != Focus::Input;
            state.focus = Focus::Input;
            changed
        }

        Action::InputBlur => {
            let changed = state.focus != Focus::List;
            state.focus = Focus::List;
            changed
        }

        Action::InputChange(text) => {
            if state.draft != text {
                state.draft = text;
                true
            } else {
                false
            }
        }

        Action::InputToggleCompleted => {
            state.draft_completed = !state.draft_completed;
            true
        }

        Action::InputSubmit(text) => {
            if text.trim().is_empty() {
                state.status = Some(Status::Error(EMPTY_TITLE_MESSAGE.to_string()));
                return true;
            }
            match state.todos.create(text, state.draft_completed) {
                Ok(id) => {
                    state.draft.clear();
                    state.draft_completed = false;
                    if state.is_visible(id) {
                        state.selected = Some(id);
                    }
                }
                Err(e) => state.report(e),
            }
            true
        }

        // ===== Drag and drop =====
        Action::DragStart(id) => {
            if state.todos.get(id).is_none() {
                return cleared_status;
            }
            state.drag = Some(DragState {
                source: id,
                target: None,
            });
            state.selected = Some(id);
            state.focus = Focus::List;
            true
        }

        Action::DragOver(id) => match state.drag.as_mut() {
            Some(drag) if drag.target != Some(id) => {
                drag.target = Some(id);
                true
            }
            _ => false,
        },

        Action::DragDrop => match state.drag.take() {
            Some(DragState {
                source,
                target: Some(target),
            }) if source != target => {
                match state.todos.position(target) {
                    Some(to) => {
                        if let Err(e) = state.todos.move_id(source, to) {
                            state.report(e);
                        }
                    }
                    None => state.report(todo_core::TodoError::UnknownId(target)),
                }
                true
            }
            Some(_) => true,
            None => false,
        },

        Action::DragCancel => state.drag.take().is_some(),

        // ===== UI =====
        Action::ThemeToggle => {
            state.theme = state.theme.toggle();
            true
        }

        Action::UiResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                true
            } else {
                false
            }
        }

        // Handled by the main loop
        Action::Quit => false,
    };

    changed || cleared_status
}

fn row_of(state: &AppState, id: TodoId) -> Option<usize> {
    state.visible().iter().position(|item| item.id == id)
}

fn set_filter(state: &mut AppState, filter: Filter) -> bool {
    if state.filter == filter {
        return false;
    }
    let row = state.selected_row().unwrap_or(0);
    state.filter = filter;
    state.drag = None;
    state.repair_selection(row);
    true
}

fn select_row(state: &mut AppState, pick: impl FnOnce(usize) -> Option<usize>) -> bool {
    let visible = state.visible_ids();
    let next = pick(visible.len()).and_then(|row| visible.get(row).copied());
    if next.is_some() && next != state.selected {
        state.selected = next;
        true
    } else {
        false
    }
}

fn step_selection(state: &mut AppState, delta: isize) -> bool {
    match state.selected_row() {
        Some(row) => select_row(state, |len| {
            row.checked_add_signed(delta).filter(|next| *next < len)
        }),
        // Nothing selected yet: start at the edge we are moving from
        None if delta > 0 => select_row(state, |_| Some(0)),
        None => select_row(state, |len| len.checked_sub(1)),
    }
}

/// Move the selected item past its visible neighbour.
///
/// Hidden items between the two keep their relative order.
fn move_selected(state: &mut AppState, delta: isize) -> bool {
    let Some(id) = state.selected else {
        return false;
    };
    let visible = state.visible_ids();
    let Some(neighbour) = state
        .selected_row()
        .and_then(|row| row.checked_add_signed(delta))
        .and_then(|row| visible.get(row).copied())
    else {
        return false;
    };
    let Some(to) = state.todos.position(neighbour) else {
        return false;
    };
    match state.todos.move_id(id, to) {
        Ok(()) => true,
        Err(e) => {
            state.report(e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use todo_core::TodoStore;

    fn titles(state: &AppState) -> Vec<&str> {
        state.todos.items().iter().map(|i| i.title.as_str()).collect()
    }

    fn state_of(entries: &[(&str, bool)]) -> AppState {
        AppState::new(TodoStore::with_items(entries.iter().copied()))
    }

    fn id_of(state: &AppState, title: &str) -> TodoId {
        state
            .todos
            .items()
            .iter()
            .find(|i| i.title == title)
            .map(|i| i.id)
            .unwrap()
    }

    #[test]
    fn test_submit_prepends_and_selects() {
        let mut state = state_of(&[("A", false)]);
        reducer(&mut state, Action::InputChange("  B  ".into()));
        reducer(&mut state, Action::InputToggleCompleted);

        let draft = state.draft.clone();
        assert!(reducer(&mut state, Action::InputSubmit(draft)));
        assert_eq!(titles(&state), vec!["B", "A"]);
        assert!(state.todos.items()[0].completed);
        assert_eq!(state.selected, Some(state.todos.items()[0].id));
        assert_eq!(state.draft, "");
        assert!(!state.draft_completed);
    }

    #[test]
    fn test_submit_blank_sets_status_only() {
        let mut state = state_of(&[("A", false)]);
        let revision = state.todos.revision();

        assert!(reducer(&mut state, Action::InputSubmit("   ".into())));
        assert_eq!(
            state.status,
            Some(Status::Error(EMPTY_TITLE_MESSAGE.to_string()))
        );
        assert_eq!(state.todos.revision(), revision);
        assert_eq!(titles(&state), vec!["A"]);
    }

    #[test]
    fn test_status_clears_on_next_action() {
        let mut state = state_of(&[("A", false)]);
        reducer(&mut state, Action::InputSubmit(String::new()));
        assert!(state.status.is_some());

        // Even a no-op action redraws to remove the message
        assert!(reducer(&mut state, Action::SelectionFirst));
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_submit_hidden_by_filter_keeps_selection() {
        let mut state = state_of(&[("A", true)]).with_filter(Filter::Completed);
        let a = id_of(&state, "A");

        reducer(&mut state, Action::InputSubmit("B".into()));
        assert_eq!(titles(&state), vec!["B", "A"]);
        assert_eq!(state.selected, Some(a));
    }

    #[test]
    fn test_toggle_under_active_filter_moves_selection() {
        let mut state = state_of(&[("A", false), ("B", false), ("C", false)])
            .with_filter(Filter::Active);
        let b = id_of(&state, "B");
        reducer(&mut state, Action::SelectionSet(b));

        reducer(&mut state, Action::TodoToggle(b));
        assert!(state.todos.get(b).unwrap().completed);
        assert_eq!(state.selected, Some(id_of(&state, "C")));
    }

    #[test]
    fn test_toggle_addresses_by_id_with_duplicates() {
        let mut state = state_of(&[("Same", false), ("Same", false)]);
        let second = state.todos.items()[1].id;

        reducer(&mut state, Action::TodoToggle(second));
        assert!(!state.todos.items()[0].completed);
        assert!(state.todos.items()[1].completed);
    }

    #[test]
    fn test_delete_selects_neighbour() {
        let mut state = state_of(&[("A", false), ("B", false), ("C", false)]);
        let b = id_of(&state, "B");
        reducer(&mut state, Action::SelectionSet(b));

        reducer(&mut state, Action::TodoDelete(b));
        assert_eq!(titles(&state), vec!["A", "C"]);
        assert_eq!(state.selected, Some(id_of(&state, "C")));
    }

    #[test]
    fn test_delete_last_item_clears_selection() {
        let mut state = state_of(&[("A", false)]);
        let a = id_of(&state, "A");
        reducer(&mut state, Action::TodoDelete(a));
        assert!(state.todos.is_empty());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_unknown_id_reports_error() {
        let mut state = state_of(&[("A", false)]);
        assert!(reducer(&mut state, Action::TodoDelete(TodoId(42))));
        assert!(matches!(state.status, Some(Status::Error(_))));
        assert_eq!(titles(&state), vec!["A"]);
    }

    #[test]
    fn test_move_absolute() {
        let mut state = state_of(&[("A", false), ("B", false), ("C", false)]);
        let a = id_of(&state, "A");
        reducer(&mut state, Action::TodoMove { id: a, to: 2 });
        assert_eq!(titles(&state), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_out_of_range_reports_error() {
        let mut state = state_of(&[("A", false), ("B", false)]);
        let a = id_of(&state, "A");
        reducer(&mut state, Action::TodoMove { id: a, to: 5 });
        assert_eq!(titles(&state), vec!["A", "B"]);
        assert!(matches!(state.status, Some(Status::Error(_))));
    }

    #[test]
    fn test_keyboard_move_skips_hidden_items() {
        let mut state = state_of(&[("A", false), ("X", true), ("B", false)])
            .with_filter(Filter::Active);
        let b = id_of(&state, "B");
        reducer(&mut state, Action::SelectionSet(b));

        assert!(reducer(&mut state, Action::TodoMoveUp));
        assert_eq!(titles(&state), vec!["B", "A", "X"]);
        assert_eq!(state.selected, Some(b));

        assert!(reducer(&mut state, Action::TodoMoveDown));
        assert_eq!(titles(&state), vec!["A", "B", "X"]);
    }

    #[test]
    fn test_keyboard_move_at_edge_is_noop() {
        let mut state = state_of(&[("A", false), ("B", false)]);
        assert!(!reducer(&mut state, Action::TodoMoveUp));
        assert_eq!(titles(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_clear_completed() {
        let mut state = state_of(&[("A", true), ("B", false), ("C", true)]);
        assert!(reducer(&mut state, Action::TodoClearCompleted));
        assert_eq!(titles(&state), vec!["B"]);
        assert_eq!(state.selected, Some(id_of(&state, "B")));
        assert!(matches!(state.status, Some(Status::Info(ref s)) if s == "Cleared 2 completed items"));

        assert!(reducer(&mut state, Action::TodoClearCompleted));
        assert!(!reducer(&mut state, Action::TodoClearCompleted));
    }

    #[test]
    fn test_selection_navigation() {
        let mut state = state_of(&[("A", false), ("B", false), ("C", false)]);
        assert_eq!(state.selected_row(), Some(0));

        assert!(reducer(&mut state, Action::SelectionNext));
        assert_eq!(state.selected_row(), Some(1));
        assert!(reducer(&mut state, Action::SelectionLast));
        assert_eq!(state.selected_row(), Some(2));
        assert!(!reducer(&mut state, Action::SelectionNext));
        assert!(reducer(&mut state, Action::SelectionFirst));
        assert!(!reducer(&mut state, Action::SelectionPrev));
    }

    #[test]
    fn test_selection_set_ignores_hidden() {
        let mut state = state_of(&[("A", false), ("B", true)]).with_filter(Filter::Active);
        let b = id_of(&state, "B");
        assert!(!reducer(&mut state, Action::SelectionSet(b)));
        assert_eq!(state.selected, Some(id_of(&state, "A")));
    }

    #[test]
    fn test_filter_cycle_and_empty_view() {
        let mut state = state_of(&[("A", false)]);
        assert!(reducer(&mut state, Action::FilterCycle));
        assert_eq!(state.filter, Filter::Active);
        assert!(reducer(&mut state, Action::FilterCycle));
        assert_eq!(state.filter, Filter::Completed);
        assert_eq!(state.selected, None);
        assert!(reducer(&mut state, Action::FilterCycle));
        assert_eq!(state.filter, Filter::All);
        assert_eq!(state.selected, Some(id_of(&state, "A")));
        assert!(!reducer(&mut state, Action::FilterSet(Filter::All)));
    }

    #[test]
    fn test_focus_round_trip() {
        let mut state = state_of(&[]);
        assert!(reducer(&mut state, Action::InputFocus));
        assert!(!reducer(&mut state, Action::InputFocus));
        assert_eq!(state.focus, Focus::Input);
        assert!(reducer(&mut state, Action::InputBlur));
        assert_eq!(state.focus, Focus::List);
    }

    #[test]
    fn test_drag_and_drop_reorders() {
        let mut state = state_of(&[("A", false), ("B", false), ("C", false)]);
        let a = id_of(&state, "A");
        let c = id_of(&state, "C");

        assert!(reducer(&mut state, Action::DragStart(a)));
        assert!(reducer(&mut state, Action::DragOver(c)));
        assert!(!reducer(&mut state, Action::DragOver(c)));
        assert!(reducer(&mut state, Action::DragDrop));

        assert_eq!(titles(&state), vec!["B", "C", "A"]);
        assert_eq!(state.drag, None);
        assert_eq!(state.selected, Some(a));
    }

    #[test]
    fn test_drag_under_filter_uses_collection_positions() {
        let mut state = state_of(&[("A", false), ("X", true), ("B", false)])
            .with_filter(Filter::Active);
        let a = id_of(&state, "A");
        let b = id_of(&state, "B");

        reducer(&mut state, Action::DragStart(b));
        reducer(&mut state, Action::DragOver(a));
        reducer(&mut state, Action::DragDrop);
        assert_eq!(titles(&state), vec!["B", "A", "X"]);
    }

    #[test]
    fn test_drop_on_self_or_nowhere_is_noop() {
        let mut state = state_of(&[("A", false), ("B", false)]);
        let a = id_of(&state, "A");

        reducer(&mut state, Action::DragStart(a));
        reducer(&mut state, Action::DragOver(a));
        reducer(&mut state, Action::DragDrop);
        assert_eq!(titles(&state), vec!["A", "B"]);

        reducer(&mut state, Action::DragStart(a));
        reducer(&mut state, Action::DragDrop);
        assert_eq!(titles(&state), vec!["A", "B"]);
        assert!(!reducer(&mut state, Action::DragDrop));
    }

    #[test]
    fn test_drag_cancel() {
        let mut state = state_of(&[("A", false)]);
        let a = id_of(&state, "A");
        reducer(&mut state, Action::DragStart(a));
        assert!(reducer(&mut state, Action::DragCancel));
        assert_eq!(state.drag, None);
        assert!(!reducer(&mut state, Action::DragCancel));
    }

    #[test]
    fn test_theme_and_resize() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::ThemeToggle));
        assert_eq!(state.theme, crate::theme::ThemeMode::Light);

        assert!(reducer(&mut state, Action::UiResize(100, 40)));
        assert!(!reducer(&mut state, Action::UiResize(100, 40)));
        assert_eq!(state.terminal_size, (100, 40));
    }

    #[test]
    fn test_observers_see_reducer_mutations() {
        use std::cell::RefCell;
        use std::rc::Rc;
        use todo_core::Change;

        let mut state = state_of(&[("A", false)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state
            .todos
            .subscribe(move |event| sink.borrow_mut().push(event.change.clone()));

        let a = id_of(&state, "A");
        reducer(&mut state, Action::TodoToggle(a));
        reducer(&mut state, Action::InputSubmit("   ".into()));

        assert_eq!(
            *seen.borrow(),
            vec![Change::CompletedSet {
                id: a,
                completed: true
            }]
        );
    }
}
