//! Context-aware keybindings with key-string parsing

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Where keyboard focus is; selects which binding table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingContext {
    List,
    Input,
}

/// Everything a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Quit,
    ToggleTheme,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    Toggle,
    Delete,
    MoveUp,
    MoveDown,
    NewTodo,
    CycleFilter,
    ShowAll,
    ShowActive,
    ShowCompleted,
    ClearCompleted,
    Submit,
    Cancel,
    ToggleDraftCompleted,
}

type BindingTable = HashMap<Command, Vec<String>>;

/// Binding tables: `global` is checked after the focused context's table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub global: BindingTable,
    pub list: BindingTable,
    pub input: BindingTable,
}

fn table(entries: &[(Command, &[&str])]) -> BindingTable {
    entries
        .iter()
        .map(|(command, keys)| (*command, keys.iter().map(|k| k.to_string()).collect()))
        .collect()
}

impl Keybindings {
    /// Built-in bindings
    pub fn defaults() -> Self {
        use Command::*;
        Self {
            global: table(&[(Quit, &["ctrl+c"]), (ToggleTheme, &["ctrl+j"])]),
            list: table(&[
                (Quit, &["q", "esc"]),
                (ToggleTheme, &["t"]),
                (SelectNext, &["j", "down"]),
                (SelectPrev, &["k", "up"]),
                (SelectFirst, &["g", "home"]),
                (SelectLast, &["shift+g", "end"]),
                (Toggle, &["space", "x"]),
                (Delete, &["d", "delete"]),
                (MoveUp, &["shift+k", "shift+up"]),
                (MoveDown, &["shift+j", "shift+down"]),
                (NewTodo, &["n", "i", "enter"]),
                (CycleFilter, &["tab"]),
                (ShowAll, &["1"]),
                (ShowActive, &["2"]),
                (ShowCompleted, &["3"]),
                (ClearCompleted, &["shift+c"]),
            ]),
            input: table(&[
                (Submit, &["enter"]),
                (Cancel, &["esc"]),
                (ToggleDraftCompleted, &["ctrl+t"]),
            ]),
        }
    }

    fn context_table(&self, context: BindingContext) -> &BindingTable {
        match context {
            BindingContext::List => &self.list,
            BindingContext::Input => &self.input,
        }
    }

    fn context_table_mut(&mut self, context: BindingContext) -> &mut BindingTable {
        match context {
            BindingContext::List => &mut self.list,
            BindingContext::Input => &mut self.input,
        }
    }

    /// Bind `command` in `context`, replacing its previous keys there
    pub fn bind(&mut self, context: BindingContext, command: Command, keys: Vec<String>) {
        self.context_table_mut(context).insert(command, keys);
    }

    /// Command bound to `key` in `context`, falling back to global
    pub fn get_command(&self, key: KeyEvent, context: BindingContext) -> Option<Command> {
        match_key(key, self.context_table(context)).or_else(|| match_key(key, &self.global))
    }

    /// First key string for `command`, for display in hints
    pub fn first_key(&self, command: Command, context: BindingContext) -> Option<&str> {
        self.context_table(context)
            .get(&command)
            .or_else(|| self.global.get(&command))
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// User tables override defaults per command
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.global.extend(user.global);
        defaults.list.extend(user.list);
        defaults.input.extend(user.input);
        defaults
    }

    /// Every key string that fails to parse, with the command it was bound to
    pub fn invalid_keys(&self) -> Vec<(Command, String)> {
        let mut invalid: Vec<(Command, String)> = [&self.global, &self.list, &self.input]
            .into_iter()
            .flat_map(|t| t.iter())
            .flat_map(|(command, keys)| keys.iter().map(move |k| (*command, k)))
            .filter(|(_, k)| parse_key_string(k).is_none())
            .map(|(command, k)| (command, k.clone()))
            .collect();
        invalid.sort_by(|a, b| a.1.cmp(&b.1));
        invalid
    }
}

fn match_key(key: KeyEvent, bindings: &BindingTable) -> Option<Command> {
    bindings.iter().find_map(|(command, keys)| {
        keys.iter()
            .filter_map(|k| parse_key_string(k))
            .any(|parsed| key_matches(&parsed, &key))
            .then_some(*command)
    })
}

fn key_matches(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    // Characters compare case-insensitively; the shift modifier carries case
    let codes_match = match (parsed.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    };
    codes_match && parsed.modifiers == key.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+j", "shift+up" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(key_event(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" alone, or as the final key ("ctrl++"), is the plus key itself
    let (modifier_part, key_part) = match key_str.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None if key_str == "+" => (None, "+"),
        None => match key_str.rsplit_once('+') {
            Some((mods, key)) => (Some(mods), key),
            None => (None, key_str.as_str()),
        },
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_part.into_iter().flat_map(|m| m.split('+')) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(key_event(code, modifiers))
}

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display ("ctrl+j" -> "^J", "space" -> "Space")
pub fn format_key_for_display(key_str: &str) -> String {
    let key_str = key_str.trim().to_lowercase();
    if key_str == "shift+tab" || key_str == "backtab" {
        return "Shift+Tab".to_string();
    }

    let (mods, key_part) = match key_str.rsplit_once('+') {
        Some((mods, key)) if !key.is_empty() => (mods, key),
        _ => ("", key_str.as_str()),
    };

    let prefix: String = mods
        .split('+')
        .map(|m| match m.trim() {
            "ctrl" | "control" => "^",
            "shift" => "Shift+",
            "alt" => "Alt+",
            _ => "",
        })
        .collect();

    let key_display = match key_part {
        "esc" | "escape" => "Esc".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Backspace".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "home" => "Home".to_string(),
        "end" => "End".to_string(),
        "pageup" => "PgUp".to_string(),
        "pagedown" => "PgDn".to_string(),
        "delete" | "del" => "Del".to_string(),
        "space" => "Space".to_string(),
        c if c.chars().count() == 1 && prefix.is_empty() => c.to_string(),
        c if c.chars().count() == 1 => c.to_uppercase(),
        other => {
            let mut chars = other.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
    };

    format!("{prefix}{key_display}")
}
