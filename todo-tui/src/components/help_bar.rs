//! One-line key hints for the focused context

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::keybindings::{format_key_for_display, BindingContext, Command, Keybindings};
use crate::theme::Palette;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
    pub context: BindingContext,
    pub palette: Palette,
}

const LIST_HINTS: &[(Command, &str)] = &[
    (Command::SelectNext, "down"),
    (Command::SelectPrev, "up"),
    (Command::Toggle, "toggle"),
    (Command::MoveUp, "move up"),
    (Command::MoveDown, "move down"),
    (Command::Delete, "delete"),
    (Command::NewTodo, "new"),
    (Command::CycleFilter, "filter"),
    (Command::ToggleTheme, "theme"),
    (Command::Quit, "quit"),
];

const INPUT_HINTS: &[(Command, &str)] = &[
    (Command::Submit, "add"),
    (Command::ToggleDraftCompleted, "mark done"),
    (Command::Cancel, "back"),
    (Command::ToggleTheme, "theme"),
];

/// Key hints for the focused context, read from the live bindings
pub struct HelpBar;

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let p = props.palette;
        let hints = match props.context {
            BindingContext::List => LIST_HINTS,
            BindingContext::Input => INPUT_HINTS,
        };

        let key_style = Style::default().fg(p.accent).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(p.muted);
        let mut spans = Vec::new();
        for (command, label) in hints {
            let Some(key) = props.keybindings.first_key(*command, props.context) else {
                continue;
            };
            spans.push(Span::styled(format_key_for_display(key), key_style));
            spans.push(Span::styled(format!(" {label}  "), text_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;

    fn render(bindings: &Keybindings, context: BindingContext) -> String {
        let mut render = RenderHarness::new(120, 1);
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            HelpBar.render(
                frame,
                area,
                HelpBarProps {
                    keybindings: bindings,
                    context,
                    palette: Palette::DARK,
                },
            );
        })
    }

    #[test]
    fn test_list_hints() {
        let output = render(&Keybindings::defaults(), BindingContext::List);
        assert!(output.contains("Space toggle"), "{output}");
        assert!(output.contains("q quit"), "{output}");
        assert!(!output.contains("add"), "{output}");
    }

    #[test]
    fn test_input_hints_follow_rebinding() {
        let mut bindings = Keybindings::defaults();
        bindings.bind(BindingContext::Input, Command::Submit, vec!["ctrl+s".into()]);
        let output = render(&bindings, BindingContext::Input);
        assert!(output.contains("^S add"), "{output}");
        assert!(output.contains("^J theme"), "{output}");
    }
}
