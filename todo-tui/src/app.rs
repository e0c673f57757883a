//! Screen layout and event routing

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::action::Action;
use crate::components::{
    Component, CreateForm, CreateFormProps, Footer, FooterProps, Header, HeaderProps, HelpBar,
    HelpBarProps, TodoListProps, TodoListView,
};
use crate::event::{EventKind, EventOutcome};
use crate::keybindings::{BindingContext, Command, Keybindings};
use crate::state::{AppState, Focus};
use crate::store::{Middleware, Store};

/// Content column width cap, so rows do not stretch across wide terminals
const MAX_WIDTH: u16 = 72;

/// Result of feeding one event through [`TodoUi::step`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Actions produced, in dispatch order
    pub actions: Vec<Action>,
    pub needs_render: bool,
    /// `Quit` was produced; actions after it were dropped
    pub quit: bool,
}

/// Owns the components and the bindings; holds no application data
pub struct TodoUi {
    keybindings: Keybindings,
    header: Header,
    form: CreateForm,
    list: TodoListView,
    footer: Footer,
    help: HelpBar,
}

fn context(state: &AppState) -> BindingContext {
    match state.focus {
        Focus::List => BindingContext::List,
        Focus::Input => BindingContext::Input,
    }
}

impl TodoUi {
    pub fn new(keybindings: Keybindings) -> Self {
        Self {
            keybindings,
            header: Header::default(),
            form: CreateForm::new(),
            list: TodoListView::new(),
            footer: Footer::default(),
            help: HelpBar,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let p = state.theme.palette();
        frame.render_widget(Block::default().style(Style::default().bg(p.background)), area);

        let [column] = Layout::horizontal([Constraint::Max(MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let column = Rect {
            x: column.x + 1,
            width: column.width.saturating_sub(2),
            ..column
        };
        let [_, header, _, form, _, list, footer, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(column);

        self.header.render(frame, header, HeaderProps { theme: state.theme });
        self.form.render(frame, form, form_props(state));
        self.list.render(frame, list, list_props(state));
        self.footer.render(frame, footer, footer_props(state));
        self.help.render(
            frame,
            help,
            HelpBarProps {
                keybindings: &self.keybindings,
                context: context(state),
                palette: p,
            },
        );
    }

    /// Map one event and dispatch what it produces.
    ///
    /// Components read their props from the state, so every action has to
    /// land before the next event is mapped. Both the binary and the test
    /// harness drive the app through here.
    pub fn step<M: Middleware<Action>>(
        &mut self,
        event: &EventKind,
        store: &mut Store<AppState, Action, M>,
    ) -> Step {
        let outcome = self.map_event(event, store.state());
        let mut step = Step {
            actions: Vec::with_capacity(outcome.actions.len()),
            needs_render: outcome.needs_render,
            quit: false,
        };
        for action in outcome.actions {
            if matches!(action, Action::Quit) {
                step.actions.push(action);
                step.quit = true;
                break;
            }
            step.needs_render |= store.dispatch(action.clone());
            step.actions.push(action);
        }
        step
    }

    /// Turn one terminal event into actions against the current state
    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(width, height) => {
                EventOutcome::action(Action::UiResize(*width, *height)).with_render()
            }
            EventKind::Key(key) => {
                if let Some(command) = self.keybindings.get_command(*key, context(state)) {
                    return EventOutcome::from_actions(command_actions(command, state));
                }
                if state.focus == Focus::Input {
                    let actions = self.form.handle_event(event, form_props(state));
                    // Cursor moves change nothing in state but still need a redraw
                    return EventOutcome::from_actions(actions).with_render();
                }
                EventOutcome::ignored()
            }
            EventKind::Mouse(mouse) => {
                let mut actions: Vec<Action> = Vec::new();
                let pressed = mouse.kind == MouseEventKind::Down(MouseButton::Left);
                let at = Position::new(mouse.column, mouse.row);

                actions.extend(self.header.handle_event(event, HeaderProps { theme: state.theme }));
                actions.extend(self.form.handle_event(event, form_props(state)));
                let list_actions: Vec<Action> = self
                    .list
                    .handle_event(event, list_props(state))
                    .into_iter()
                    .collect();
                if pressed && !list_actions.is_empty() && state.focus == Focus::Input {
                    actions.push(Action::InputBlur);
                }
                actions.extend(list_actions);
                actions.extend(self.footer.handle_event(event, footer_props(state)));

                let outcome = EventOutcome::from_actions(actions);
                // Clicking into the form only moves the cursor
                if pressed && self.form.contains(at.x, at.y) {
                    outcome.with_render()
                } else {
                    outcome
                }
            }
            EventKind::Scroll { .. } => {
                EventOutcome::from_actions(self.list.handle_event(event, list_props(state)))
            }
        }
    }
}

fn list_props(state: &AppState) -> TodoListProps<'_> {
    TodoListProps {
        todos: &state.todos,
        filter: state.filter,
        selected: state.selected,
        drag: state.drag,
        is_focused: state.focus == Focus::List,
        palette: state.theme.palette(),
    }
}

fn form_props(state: &AppState) -> CreateFormProps<'_> {
    CreateFormProps {
        value: &state.draft,
        completed: state.draft_completed,
        is_focused: state.focus == Focus::Input,
        palette: state.theme.palette(),
    }
}

fn footer_props(state: &AppState) -> FooterProps<'_> {
    FooterProps {
        items_left: state.todos.items_left(),
        completed: state.todos.completed_count(),
        filter: state.filter,
        status: state.status.as_ref(),
        palette: state.theme.palette(),
    }
}

/// Actions for a bound command; commands aimed at the selection do nothing
/// when nothing is selected
fn command_actions(command: Command, state: &AppState) -> Vec<Action> {
    use todo_core::Filter;

    let on_selected = |f: fn(todo_core::TodoId) -> Action| -> Vec<Action> {
        state.selected.map(f).into_iter().collect()
    };
    match command {
        Command::Quit => vec![Action::Quit],
        Command::ToggleTheme => vec![Action::ThemeToggle],
        Command::SelectNext => vec![Action::SelectionNext],
        Command::SelectPrev => vec![Action::SelectionPrev],
        Command::SelectFirst => vec![Action::SelectionFirst],
        Command::SelectLast => vec![Action::SelectionLast],
        Command::Toggle => on_selected(Action::TodoToggle),
        Command::Delete => on_selected(Action::TodoDelete),
        Command::MoveUp => vec![Action::TodoMoveUp],
        Command::MoveDown => vec![Action::TodoMoveDown],
        Command::NewTodo => vec![Action::InputFocus],
        Command::CycleFilter => vec![Action::FilterCycle],
        Command::ShowAll => vec![Action::FilterSet(Filter::All)],
        Command::ShowActive => vec![Action::FilterSet(Filter::Active)],
        Command::ShowCompleted => vec![Action::FilterSet(Filter::Completed)],
        Command::ClearCompleted => vec![Action::TodoClearCompleted],
        Command::Submit => vec![Action::InputSubmit(state.draft.clone())],
        Command::Cancel => {
            if state.drag.is_some() {
                vec![Action::DragCancel, Action::InputBlur]
            } else {
                vec![Action::InputBlur]
            }
        }
        Command::ToggleDraftCompleted => vec![Action::InputToggleCompleted],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, key};
    use crate::{assert_emitted, assert_not_emitted};
    use pretty_assertions::assert_eq;

    fn map(ui: &mut TodoUi, event: EventKind, state: &AppState) -> EventOutcome<Action> {
        ui.map_event(&event, state)
    }

    #[test]
    fn test_list_keys_map_to_actions() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let state = AppState::default();
        let first = state.todos.items()[0].id;

        let out = map(&mut ui, EventKind::Key(key("space")), &state);
        assert_eq!(out.actions, vec![Action::TodoToggle(first)]);

        let out = map(&mut ui, EventKind::Key(key("d")), &state);
        assert_eq!(out.actions, vec![Action::TodoDelete(first)]);

        let out = map(&mut ui, EventKind::Key(key("shift+j")), &state);
        assert_eq!(out.actions, vec![Action::TodoMoveDown]);

        let out = map(&mut ui, EventKind::Key(key("ctrl+j")), &state);
        assert_eq!(out.actions, vec![Action::ThemeToggle]);
    }

    #[test]
    fn test_selection_commands_need_selection() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let state = AppState::new(todo_core::TodoStore::new());
        let out = map(&mut ui, EventKind::Key(key("space")), &state);
        assert!(out.actions.is_empty());
    }

    #[test]
    fn test_typing_goes_to_form_when_focused() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let mut state = AppState::default();
        state.focus = Focus::Input;

        let out = map(&mut ui, EventKind::Key(char_key('q')), &state);
        assert_eq!(out.actions, vec![Action::InputChange("q".into())]);
        assert!(out.needs_render);

        state.draft = "Buy milk".into();
        let out = map(&mut ui, EventKind::Key(key("enter")), &state);
        assert_eq!(out.actions, vec![Action::InputSubmit("Buy milk".into())]);

        let out = map(&mut ui, EventKind::Key(key("esc")), &state);
        assert_emitted!(out.actions, Action::InputBlur);
        assert_not_emitted!(out.actions, Action::Quit);
    }

    #[test]
    fn test_unbound_key_in_list_is_ignored() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let state = AppState::default();
        let out = map(&mut ui, EventKind::Key(char_key('z')), &state);
        assert!(out.is_empty());
    }

    #[test]
    fn test_each_step_sees_previous_dispatch() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let mut store = Store::new(AppState::default(), crate::reducer::reducer);
        ui.step(&EventKind::Key(key("n")), &mut store);

        for c in "abc".chars() {
            ui.step(&EventKind::Key(char_key(c)), &mut store);
        }
        assert_eq!(store.state().draft, "abc");

        // Mapping two keys against one unchanged state would lose the first
        let stale = store.state();
        let first = ui.map_event(&EventKind::Key(char_key('d')), stale);
        let second = ui.map_event(&EventKind::Key(char_key('e')), stale);
        assert_eq!(first.actions, vec![Action::InputChange("abcd".into())]);
        assert_eq!(second.actions, vec![Action::InputChange("abce".into())]);
    }

    #[test]
    fn test_step_stops_at_quit() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let mut store = Store::new(AppState::default(), crate::reducer::reducer);
        let step = ui.step(&EventKind::Key(key("q")), &mut store);
        assert!(step.quit);
        assert_eq!(step.actions, vec![Action::Quit]);
    }

    #[test]
    fn test_resize() {
        let mut ui = TodoUi::new(Keybindings::defaults());
        let out = map(&mut ui, EventKind::Resize(100, 30), &AppState::default());
        assert_eq!(out.actions, vec![Action::UiResize(100, 30)]);
        assert!(out.needs_render);
    }
}
