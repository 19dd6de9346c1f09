use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Row, Table},
    Frame,
};

/// The fixed prefix shown before the server's reason for rejecting a login.
const ALERT_PREFIX: &str = "Login failed: ";

/// Modal states that take over input while they're shown
#[derive(Debug)]
pub enum Popover {
    /// Show a table of keyboard shortcuts
    Help,

    /// A blocking alert with the server's reason for rejecting a login
    Alert(String),
}

impl Popover {
    /// The text an alert shows. The help popover has no single text.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Help => None,
            Self::Alert(reason) => Some(format!("{ALERT_PREFIX}{reason}")),
        }
    }

    /// Render the popover over the given area
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        match self {
            Self::Help => {
                let popup_vert = Layout::vertical([Constraint::Max(12)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(60)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let help = Table::new(
                    [
                        Row::new(vec!["F1", "Show this help"]),
                        Row::new(vec!["tab / shift-tab", "Move between fields"]),
                        Row::new(vec!["enter", "Sign in"]),
                        Row::new(vec!["esc", "Quit from an idle form"]),
                        Row::new(vec!["enter / esc (alert)", "Dismiss the alert"]),
                        Row::new(vec!["l (home)", "Log out"]),
                        Row::new(vec!["q (home)", "Quit"]),
                        Row::new(vec!["ctrl-c", "Quit from anywhere"]),
                    ],
                    [Constraint::Max(20), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::new().blue())
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1)),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(help, popup_area);
            }

            Self::Alert(_) => {
                // an alert always has text
                let Some(text) = self.text() else { return };

                let popup_vert = Layout::vertical([Constraint::Length(3)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let alert = Paragraph::new(text).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::new().red())
                        .padding(Padding::horizontal(1)),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(alert, popup_area);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn alert_text_carries_the_fixed_prefix() {
        let popover = Popover::Alert("bad credentials".to_string());

        assert_eq!(
            popover.text(),
            Some("Login failed: bad credentials".to_string())
        );
    }

    #[test]
    fn help_has_no_text() {
        assert_eq!(Popover::Help.text(), None);
    }
}
