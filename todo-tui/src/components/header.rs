//! Title bar with the theme switch

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::event::EventKind;
use crate::theme::ThemeMode;

pub const TITLE: &str = "T O D O";

pub struct HeaderProps {
    pub theme: ThemeMode,
}

/// Title on the left, theme switch on the right
#[derive(Default)]
pub struct Header {
    toggle_area: Rect,
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self
                        .toggle_area
                        .contains(Position::new(mouse.column, mouse.row)) =>
            {
                Some(Action::ThemeToggle)
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let p = props.theme.palette();
        let title = Line::from(Span::styled(
            TITLE,
            Style::default().fg(p.title).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title), area);

        let icon = props.theme.toggle_icon();
        let width = 3.min(area.width);
        self.toggle_area = Rect::new(area.right().saturating_sub(width), area.y, width, area.height.min(1));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(icon, Style::default().fg(p.title))).right_aligned()),
            self.toggle_area,
        );
    }
}
