pub mod create_form;
pub mod footer;
pub mod header;
pub mod help_bar;
pub mod todo_list;

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

pub use crate::component::Component;
use crate::theme::Palette;

pub use create_form::{CreateForm, CreateFormProps};
pub use footer::{Footer, FooterProps};
pub use header::{Header, HeaderProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use todo_list::{TodoListProps, TodoListView};

/// "( )" or "(✓)"; the checked box uses both gradient ends
pub(crate) fn checkbox_spans(checked: bool, p: &Palette) -> [Span<'static>; 3] {
    if checked {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        [
            Span::styled("(", bold.fg(p.check_from)),
            Span::styled("✓", bold.fg(p.title)),
            Span::styled(")", bold.fg(p.check_to)),
        ]
    } else {
        let style = Style::default().fg(p.muted);
        [
            Span::styled("(", style),
            Span::raw(" "),
            Span::styled(")", style),
        ]
    }
}
