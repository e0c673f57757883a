//! Test utilities
//!
//! - [`key`], [`char_key`], [`ctrl_key`]: build `KeyEvent`s
//! - [`click`], [`drag`], [`release`], [`scroll`]: build mouse events
//! - [`RenderHarness`]: render into a `TestBackend` and read the buffer as text
//! - [`AppHarness`]: the whole app (store, reducer and UI) without a terminal
//! - `assert_emitted!` and friends for checking component output

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::action::Action;
use crate::app::TodoUi;
use crate::event::EventKind;
use crate::keybindings::{parse_key_string, Keybindings};
use crate::reducer::reducer;
use crate::state::AppState;
use crate::store::Store;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
///
/// ```
/// use todo_tui::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("ctrl+j");
/// assert_eq!(k.code, KeyCode::Char('j'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn char_key(c: char) -> KeyEvent {
    // Terminals report uppercase letters with SHIFT held
    let modifiers = if c.is_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    press(KeyCode::Char(c), modifiers)
}

pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Left button press
pub fn click(column: u16, row: u16) -> EventKind {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Pointer moved with the left button held
pub fn drag(column: u16, row: u16) -> EventKind {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

pub fn release(column: u16, row: u16) -> EventKind {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

pub fn scroll(column: u16, row: u16, delta: isize) -> EventKind {
    EventKind::Scroll { column, row, delta }
}

/// Renders into an in-memory terminal
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        Self { terminal }
    }

    pub fn render(&mut self, f: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal.draw(f).expect("TestBackend never fails");
        self.terminal.backend().buffer()
    }

    /// Render and return the buffer as lines of text, styles dropped
    pub fn render_to_string_plain(&mut self, f: impl FnOnce(&mut Frame)) -> String {
        let buffer = self.render(f);
        buffer_to_string_plain(buffer)
    }
}

pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Drives the app the way the binary does: every event goes through
/// [`TodoUi::step`], rendering only when asked.
pub struct AppHarness {
    pub store: Store<AppState, Action>,
    pub ui: TodoUi,
    render: RenderHarness,
    quit: bool,
}

impl AppHarness {
    pub fn new(state: AppState, width: u16, height: u16) -> Self {
        let mut store = Store::new(state, reducer);
        store.dispatch(Action::UiResize(width, height));
        Self {
            store,
            ui: TodoUi::new(Keybindings::defaults()),
            render: RenderHarness::new(width, height),
            quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Feed one event; returns the actions it produced
    pub fn send(&mut self, event: EventKind) -> Vec<Action> {
        let step = self.ui.step(&event, &mut self.store);
        self.quit |= step.quit;
        step.actions
    }

    /// Feed events back to back with no render between them, as when the
    /// poller delivers a burst. Stops after a quit.
    pub fn send_burst(&mut self, events: impl IntoIterator<Item = EventKind>) -> Vec<Action> {
        let mut actions = Vec::new();
        for event in events {
            actions.extend(self.send(event));
            if self.quit {
                break;
            }
        }
        actions
    }

    /// Whether some event asked the app to exit
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn press(&mut self, key_str: &str) -> Vec<Action> {
        self.send(EventKind::Key(key(key_str)))
    }

    /// Type text into whatever has focus, one key per char, as one burst
    pub fn type_text(&mut self, text: &str) {
        self.send_burst(text.chars().map(|c| EventKind::Key(char_key(c))));
    }

    /// Render the whole screen as text
    pub fn screen(&mut self) -> String {
        let Self { store, ui, render, .. } = self;
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            ui.render(frame, area, store.state());
        })
    }
}

/// Assert that at least one action matches a pattern
///
/// ```
/// use todo_tui::action::Action;
/// use todo_tui::assert_emitted;
///
/// let actions = vec![Action::FilterCycle, Action::ThemeToggle];
/// assert_emitted!(actions, Action::ThemeToggle);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that some action belongs to a category
#[macro_export]
macro_rules! assert_category_emitted {
    ($actions:expr, $category:expr) => {
        assert!(
            $actions.iter().any(|a| {
                use todo_core::ActionCategory as _;
                a.category() == Some($category)
            }),
            "Expected action with category `{}` to be emitted, but got: {:?}",
            $category,
            $actions
        );
    };
}
