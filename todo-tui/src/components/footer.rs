//! Counter, filter tabs, bulk clear, and the status line beneath them

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use todo_core::Filter;

use super::Component;
use crate::action::Action;
use crate::event::EventKind;
use crate::state::Status;
use crate::theme::Palette;

pub const CLEAR_LABEL: &str = "Clear completed";
pub const DRAG_HINT: &str = "Drag and drop to reorder list";

const TAB_GAP: u16 = 2;

pub struct FooterProps<'a> {
    pub items_left: usize,
    pub completed: usize,
    pub filter: Filter,
    pub status: Option<&'a Status>,
    pub palette: Palette,
}

pub fn items_left_label(n: usize) -> String {
    format!("{n} item{} left", if n == 1 { "" } else { "s" })
}

#[derive(Default)]
pub struct Footer {
    tabs: Vec<(Rect, Filter)>,
    clear: Rect,
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Mouse(mouse) = event else {
            return None;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let at = Position::new(mouse.column, mouse.row);
        if self.clear.contains(at) {
            return Some(Action::TodoClearCompleted);
        }
        self.tabs
            .iter()
            .find(|(rect, _)| rect.contains(at))
            .map(|(_, filter)| Action::FilterSet(*filter))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let p = props.palette;
        self.tabs.clear();
        self.clear = Rect::default();
        if area.height == 0 {
            return;
        }

        let bar = Rect { height: 1, ..area };
        let count = format!(" {}", items_left_label(props.items_left));
        frame.render_widget(
            Paragraph::new(count.as_str()).style(Style::default().bg(p.surface).fg(p.muted)),
            bar,
        );

        let clear_width = CLEAR_LABEL.len() as u16;
        if props.completed > 0 && bar.width > clear_width + 1 {
            self.clear = Rect::new(bar.right() - clear_width - 1, bar.y, clear_width, 1);
            frame.render_widget(
                Paragraph::new(CLEAR_LABEL).style(Style::default().bg(p.surface).fg(p.muted)),
                self.clear,
            );
        }

        // Tabs live strictly between the counter and the clear button
        let left = bar.x + count.len() as u16 + TAB_GAP;
        let right = if self.clear.is_empty() {
            bar.right()
        } else {
            self.clear.x.saturating_sub(TAB_GAP)
        };
        let room = right.saturating_sub(left);
        let tabs_width = Filter::ALL
            .iter()
            .map(|f| f.label().len() as u16)
            .sum::<u16>()
            + TAB_GAP * (Filter::ALL.len() as u16 - 1);
        if room >= tabs_width {
            let mut x = left + (room - tabs_width) / 2;
            for filter in Filter::ALL {
                let width = filter.label().len() as u16;
                let rect = Rect::new(x, bar.y, width, 1);
                let style = if filter == props.filter {
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(p.muted)
                };
                frame.render_widget(Paragraph::new(Span::styled(filter.label(), style)), rect);
                self.tabs.push((rect, filter));
                x += width + TAB_GAP;
            }
        }

        if area.height > 1 {
            let line = match props.status {
                Some(status @ Status::Error(_)) => Line::styled(
                    status.text(),
                    Style::default().fg(p.error).add_modifier(Modifier::BOLD),
                ),
                Some(status) => Line::styled(status.text(), Style::default().fg(p.accent)),
                None => Line::styled(DRAG_HINT, Style::default().fg(p.muted)),
            };
            frame.render_widget(
                Paragraph::new(line).alignment(Alignment::Center),
                Rect::new(area.x, area.y + 1, area.width, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{click, RenderHarness};
    use pretty_assertions::assert_eq;

    fn props(status: Option<&Status>) -> FooterProps<'_> {
        FooterProps {
            items_left: 5,
            completed: 1,
            filter: Filter::All,
            status,
            palette: Palette::LIGHT,
        }
    }

    fn render(footer: &mut Footer, props: FooterProps<'_>) -> String {
        render_at(footer, props, 60)
    }

    fn render_at(footer: &mut Footer, props: FooterProps<'_>, width: u16) -> String {
        let mut render = RenderHarness::new(width, 2);
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            footer.render(frame, area, props);
        })
    }

    #[test]
    fn test_items_left_label() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(5), "5 items left");
    }

    #[test]
    fn test_render_bar_and_hint() {
        let mut footer = Footer::default();
        let output = render(&mut footer, props(None));
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].contains("5 items left"));
        assert!(lines[0].contains("All  Active  Completed"));
        assert!(lines[0].contains(CLEAR_LABEL));
        assert!(lines[1].contains(DRAG_HINT));
    }

    #[test]
    fn test_status_replaces_hint() {
        let mut footer = Footer::default();
        let status = Status::Error("Title cannot be empty".into());
        let output = render(&mut footer, props(Some(&status)));
        assert!(output.contains("Title cannot be empty"));
        assert!(!output.contains(DRAG_HINT));
    }

    #[test]
    fn test_clear_hidden_without_completed() {
        let mut footer = Footer::default();
        let output = render(
            &mut footer,
            FooterProps {
                completed: 0,
                ..props(None)
            },
        );
        assert!(!output.contains(CLEAR_LABEL));
        let actions: Vec<_> = footer
            .handle_event(&click(50, 0), props(None))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_clicks() {
        let mut footer = Footer::default();
        let output = render(&mut footer, props(None));
        let first = output.lines().next().unwrap_or_default();

        let col = |needle: &str| first.find(needle).unwrap() as u16;
        let mut click_at = |column: u16| -> Vec<Action> {
            footer
                .handle_event(&click(column, 0), props(None))
                .into_iter()
                .collect()
        };

        assert_eq!(click_at(col("Active") + 1), vec![Action::FilterSet(Filter::Active)]);
        assert_eq!(click_at(col("Completed ") + 2), vec![Action::FilterSet(Filter::Completed)]);
        assert_eq!(click_at(col(CLEAR_LABEL) + 3), vec![Action::TodoClearCompleted]);
        assert!(click_at(1).is_empty());
    }

    #[test]
    fn test_narrow_footer_never_overlaps_clear() {
        let mut footer = Footer::default();
        let output = render_at(&mut footer, props(None), 38);
        let first = output.lines().next().unwrap_or_default();
        assert!(first.contains(CLEAR_LABEL), "{first}");
        assert!(!first.contains("Completed"), "{first}");

        // Only the clear button's own cells clear anything
        for column in 0..38 {
            let actions: Vec<_> = footer
                .handle_event(&click(column, 0), props(None))
                .into_iter()
                .collect();
            let on_label = footer.clear.contains(Position::new(column, 0));
            assert_eq!(
                actions.contains(&Action::TodoClearCompleted),
                on_label,
                "column {column}"
            );
            assert!(!actions.iter().any(|a| matches!(a, Action::FilterSet(_))));
        }
    }

    #[test]
    fn test_narrow_footer_keeps_tabs_when_nothing_to_clear() {
        let mut footer = Footer::default();
        let no_completed = || FooterProps {
            completed: 0,
            ..props(None)
        };
        let output = render_at(&mut footer, no_completed(), 38);
        let first = output.lines().next().unwrap_or_default();
        let column = first.find("Completed").unwrap() as u16;

        let actions: Vec<_> = footer
            .handle_event(&click(column + 1, 0), no_completed())
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::FilterSet(Filter::Completed)]);
    }
}
