//! The todo rows: checkbox, title, delete button, selection and drag markers

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use todo_core::{Filter, TodoId, TodoStore};

use super::{checkbox_spans, Component};
use crate::action::Action;
use crate::event::EventKind;
use crate::state::DragState;
use crate::theme::Palette;

/// Width of the delete button at the right edge of each row
const DELETE_WIDTH: u16 = 3;

pub struct TodoListProps<'a> {
    pub todos: &'a TodoStore,
    pub filter: Filter,
    pub selected: Option<TodoId>,
    pub drag: Option<DragState>,
    pub is_focused: bool,
    pub palette: Palette,
}

/// Which part of a row the pointer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    Checkbox,
    Title,
    Delete,
}

/// Visible ids, rebuilt only when the store or the filter changes
struct Projection {
    revision: u64,
    filter: Filter,
    ids: Vec<TodoId>,
}

#[derive(Default)]
pub struct TodoListView {
    projection: Option<Projection>,
    rebuilds: usize,
    scroll: usize,
    rows_area: Rect,
}

pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "Nothing to do. Add a todo above.",
        Filter::Active => "No active todos",
        Filter::Completed => "No completed todos",
    }
}

impl TodoListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the projection was recomputed
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    fn refresh(&mut self, todos: &TodoStore, filter: Filter) {
        let fresh = self
            .projection
            .as_ref()
            .is_some_and(|p| p.revision == todos.revision() && p.filter == filter);
        if fresh {
            return;
        }
        self.projection = Some(Projection {
            revision: todos.revision(),
            filter,
            ids: filter.project(todos.items()).into_iter().map(|i| i.id).collect(),
        });
        self.rebuilds += 1;
    }

    fn ids(&self) -> &[TodoId] {
        self.projection
            .as_ref()
            .map(|p| p.ids.as_slice())
            .unwrap_or(&[])
    }

    /// Item and zone under a screen cell, as of the last render
    pub fn hit(&self, column: u16, row: u16) -> Option<(TodoId, RowZone)> {
        if !self.rows_area.contains(Position::new(column, row)) {
            return None;
        }
        let index = usize::from(row - self.rows_area.y) + self.scroll;
        let id = *self.ids().get(index)?;
        let dx = column - self.rows_area.x;
        let zone = if (1..4).contains(&dx) {
            RowZone::Checkbox
        } else if column >= self.rows_area.right().saturating_sub(DELETE_WIDTH) {
            RowZone::Delete
        } else {
            RowZone::Title
        };
        Some((id, zone))
    }

    fn keep_in_view(&mut self, selected_index: Option<usize>, len: usize, height: usize) {
        if let Some(index) = selected_index {
            if index < self.scroll {
                self.scroll = index;
            } else if index >= self.scroll + height {
                self.scroll = index + 1 - height;
            }
        }
        self.scroll = self.scroll.min(len.saturating_sub(height));
    }
}

impl Component<Action> for TodoListView {
    type Props<'a> = TodoListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Mouse(mouse) => {
                let hit = self.hit(mouse.column, mouse.row);
                match (mouse.kind, props.drag) {
                    (MouseEventKind::Down(MouseButton::Left), _) => match hit {
                        Some((id, RowZone::Checkbox)) => Some(Action::TodoToggle(id)),
                        Some((id, RowZone::Delete)) => Some(Action::TodoDelete(id)),
                        Some((id, RowZone::Title)) => Some(Action::DragStart(id)),
                        None => None,
                    },
                    (MouseEventKind::Drag(MouseButton::Left), Some(drag)) => hit
                        .map(|(id, _)| id)
                        .filter(|id| drag.target != Some(*id))
                        .map(Action::DragOver),
                    (MouseEventKind::Up(MouseButton::Left), Some(_)) => {
                        if self.rows_area.contains(Position::new(mouse.column, mouse.row)) {
                            Some(Action::DragDrop)
                        } else {
                            Some(Action::DragCancel)
                        }
                    }
                    _ => None,
                }
            }
            EventKind::Scroll { column, row, delta }
                if self.rows_area.contains(Position::new(*column, *row)) =>
            {
                if *delta > 0 {
                    Some(Action::SelectionNext)
                } else {
                    Some(Action::SelectionPrev)
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let p = props.palette;
        self.refresh(props.todos, props.filter);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if props.is_focused { p.accent } else { p.border }))
            .style(Style::default().bg(p.surface).fg(p.text));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.rows_area = inner;

        let len = self.ids().len();
        if len == 0 {
            let y = inner.y + inner.height / 2;
            let line = Rect::new(inner.x, y, inner.width, inner.height.min(1));
            frame.render_widget(
                Paragraph::new(empty_message(props.filter))
                    .style(Style::default().fg(p.muted))
                    .alignment(Alignment::Center),
                line,
            );
            return;
        }

        let height = usize::from(inner.height);
        let selected_index = props
            .selected
            .and_then(|sel| self.ids().iter().position(|id| *id == sel));
        self.keep_in_view(selected_index, len, height);

        let title_width = inner.width.saturating_sub(DELETE_WIDTH);
        for (offset, id) in self.ids().iter().skip(self.scroll).take(height).enumerate() {
            let Some(item) = props.todos.get(*id) else {
                continue;
            };
            let row = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
            let is_selected = props.selected == Some(*id);
            let is_source = props.drag.is_some_and(|d| d.source == *id);
            let is_target = props
                .drag
                .is_some_and(|d| d.target == Some(*id) && d.source != *id);

            let row_style = if is_target {
                Style::default().bg(p.border)
            } else {
                Style::default().bg(p.surface)
            };

            let marker = if is_selected {
                Span::styled(
                    "▌",
                    Style::default().fg(if props.is_focused { p.accent } else { p.muted }),
                )
            } else {
                Span::raw(" ")
            };

            let mut title_style = if item.completed {
                Style::default().fg(p.done).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(p.text)
            };
            if is_selected && props.is_focused && !item.completed {
                title_style = title_style.fg(p.hover).add_modifier(Modifier::BOLD);
            }
            if is_source {
                title_style = title_style.add_modifier(Modifier::ITALIC);
            }

            let mut spans = vec![marker];
            spans.extend(checkbox_spans(item.completed, &p));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(item.title.as_str(), title_style));

            frame.render_widget(
                Paragraph::new(Line::from(spans)).style(row_style),
                Rect {
                    width: title_width,
                    ..row
                },
            );
            frame.render_widget(
                Paragraph::new(" ✕ ").style(row_style.fg(if is_selected { p.text } else { p.muted })),
                Rect {
                    x: row.x + title_width,
                    width: row.width - title_width,
                    ..row
                },
            );
        }
    }
}
