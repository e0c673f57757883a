//! Single-line form for new todos, with a completion checkbox

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{checkbox_spans, Component};
use crate::action::Action;
use crate::event::EventKind;
use crate::theme::Palette;

pub const PLACEHOLDER: &str = "Create a new todo...";

/// Columns inside the border taken by padding and checkbox
const TEXT_OFFSET: u16 = 5;

pub struct CreateFormProps<'a> {
    pub value: &'a str,
    pub completed: bool,
    pub is_focused: bool,
    pub palette: Palette,
}

/// Text input whose value lives in app state; only the cursor is local
#[derive(Default)]
pub struct CreateForm {
    /// Byte offset into the value
    cursor: usize,
    /// First visible char when the value is wider than the box
    scroll: usize,
    area: Rect,
    inner: Rect,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    fn checkbox_area(&self) -> Rect {
        Rect::new(self.inner.x + 1, self.inner.y, 3, 1).intersection(self.inner)
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, value: &str) -> usize {
        value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, value: &str) -> usize {
        value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(value.len())
    }

    /// Start of the word before the cursor, skipping trailing spaces
    fn word_start(&self, value: &str) -> usize {
        let before = value[..self.cursor].trim_end();
        before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    /// Remove `start..self.cursor` and park the cursor at `start`
    fn cut_back_to(&mut self, value: &str, start: usize) -> Option<String> {
        if start == self.cursor {
            return None;
        }
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, value: &str) -> Option<String> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                KeyCode::Char('u') => self.cut_back_to(value, 0),
                KeyCode::Char('w') => {
                    let start = self.word_start(value);
                    self.cut_back_to(value, start)
                }
                _ => None,
            };
        }

        match code {
            KeyCode::Char(c) => Some(self.insert(value, c)),
            KeyCode::Backspace => {
                let start = self.prev_boundary(value);
                self.cut_back_to(value, start)
            }
            KeyCode::Delete => {
                if self.cursor >= value.len() {
                    return None;
                }
                let end = self.next_boundary(value);
                Some(format!("{}{}", &value[..self.cursor], &value[end..]))
            }
            KeyCode::Left => {
                self.cursor = self.prev_boundary(value);
                None
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary(value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            _ => None,
        }
    }
}

impl Component<Action> for CreateForm {
    type Props<'a> = CreateFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.clamp_cursor(props.value);

        match event {
            EventKind::Key(key) if props.is_focused => self
                .handle_key(key.code, key.modifiers, props.value)
                .map(Action::InputChange)
                .into_iter()
                .collect(),
            EventKind::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self.contains(mouse.column, mouse.row) =>
            {
                let mut actions = Vec::new();
                if !props.is_focused {
                    actions.push(Action::InputFocus);
                }
                if self
                    .checkbox_area()
                    .contains(Position::new(mouse.column, mouse.row))
                {
                    actions.push(Action::InputToggleCompleted);
                } else if mouse.column >= self.inner.x + TEXT_OFFSET {
                    let offset =
                        usize::from(mouse.column - self.inner.x - TEXT_OFFSET) + self.scroll;
                    self.cursor = props
                        .value
                        .char_indices()
                        .nth(offset)
                        .map(|(i, _)| i)
                        .unwrap_or(props.value.len());
                }
                actions
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;
        self.clamp_cursor(props.value);
        let p = props.palette;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if props.is_focused { p.accent } else { p.border }))
            .style(Style::default().bg(p.surface));
        let inner = block.inner(area);
        self.inner = inner;
        frame.render_widget(block, area);
        if inner.width <= TEXT_OFFSET || inner.height == 0 {
            return;
        }

        let text_width = usize::from(inner.width - TEXT_OFFSET);
        let cursor_col = props.value[..self.cursor].chars().count();
        if cursor_col < self.scroll {
            self.scroll = cursor_col;
        } else if cursor_col >= self.scroll + text_width {
            self.scroll = cursor_col + 1 - text_width;
        }

        let mut spans = vec![Span::raw(" ")];
        spans.extend(checkbox_spans(props.completed, &p));
        spans.push(Span::raw(" "));
        if props.value.is_empty() {
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(p.muted)));
        } else {
            let visible: String = props.value.chars().skip(self.scroll).take(text_width).collect();
            let mut style = Style::default().fg(p.text);
            if props.completed {
                style = style.add_modifier(Modifier::CROSSED_OUT).fg(p.done);
            }
            spans.push(Span::styled(visible, style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        if props.is_focused {
            let x = inner.x + TEXT_OFFSET + (cursor_col - self.scroll) as u16;
            if x < inner.right() {
                frame.set_cursor_position((x, inner.y));
            }
        }
    }
}
