use cardroom_core::api::login;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// A form for collecting credentials
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Which field is focused
    active: Field,

    /// Who's signing in?
    username: Input,

    /// Their password. Rendered masked, but held as typed.
    password: Input,
}

/// The fields of the form, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Field {
    /// The account name
    #[default]
    Username,

    /// The password
    Password,
}

impl Field {
    /// The field after this one (e.g. with tab)
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }

    /// The field before this one (e.g. with shift-tab). With two fields,
    /// going back lands in the same place as going forward.
    fn prev(self) -> Self {
        self.next()
    }
}

impl LoginForm {
    /// Render the form, centered in the given area
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(6)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        // -2 for the border, -1 for the cursor; saturating so a terminal
        // narrower than the frame doesn't underflow
        let width = popup_area.width.saturating_sub(3);

        let fields = Layout::vertical(Constraint::from_lengths([3, 3]));
        let [username_area, password_area] = fields.areas(popup_area);

        let border_style = Style::default().fg(Color::Blue);

        // USERNAME
        {
            let username_scroll = self.username.visual_scroll(width as usize);

            let username_field = Paragraph::new(self.username.value())
                .scroll((0, username_scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Username")
                        .border_style(border_style),
                );

            frame.render_widget(username_field, username_area);

            if matches!(self.active, Field::Username) {
                frame.set_cursor_position((
                    username_area.x
                        + (self.username.visual_cursor().max(username_scroll) - username_scroll)
                            as u16
                        + 1,
                    username_area.y + 1,
                ));
            }
        }

        // PASSWORD
        {
            let password_scroll = self.password.visual_scroll(width as usize);

            let password_field =
                Paragraph::new("*".repeat(self.password.value().chars().count()))
                    .scroll((0, password_scroll as u16))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Password")
                            .border_style(border_style),
                    );

            frame.render_widget(password_field, password_area);

            if matches!(self.active, Field::Password) {
                frame.set_cursor_position((
                    password_area.x
                        + (self.password.visual_cursor().max(password_scroll) - password_scroll)
                            as u16
                        + 1,
                    password_area.y + 1,
                ));
            }
        }
    }

    /// Handle a key event, either moving between fields or editing the
    /// focused one
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Username => self.username.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                };
            }
        }
    }

    /// The values in the fields right now. Submission reads these at the
    /// moment of the submit event, not before.
    pub fn credentials(&self) -> login::Req {
        login::Req {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        }
    }
}

#[cfg(test)]
impl LoginForm {
    /// A form with the fields already filled in
    pub fn with_values(username: &str, password: &str) -> Self {
        Self {
            active: Field::Username,
            username: Input::new(username.to_string()),
            password: Input::new(password.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn typed_characters_land_in_the_focused_field() {
        let mut form = LoginForm::default();

        form.handle_event(KeyEvent::from(KeyCode::Char('a')));
        form.handle_event(KeyEvent::from(KeyCode::Tab));
        form.handle_event(KeyEvent::from(KeyCode::Char('s')));

        let req = form.credentials();
        assert_eq!(req.username, "a");
        assert_eq!(req.password, "s");
    }

    #[test]
    fn tab_cycles_back_to_the_first_field() {
        let mut form = LoginForm::default();

        form.handle_event(KeyEvent::from(KeyCode::Tab));
        form.handle_event(KeyEvent::from(KeyCode::Tab));
        form.handle_event(KeyEvent::from(KeyCode::Char('a')));

        assert_eq!(form.credentials().username, "a");
    }

    #[test]
    fn shift_tab_moves_focus_too() {
        let mut form = LoginForm::default();

        form.handle_event(KeyEvent::from(KeyCode::BackTab));
        form.handle_event(KeyEvent::from(KeyCode::Char('s')));

        assert_eq!(form.credentials().password, "s");
    }

    #[test]
    fn credentials_read_the_values_at_call_time() {
        let mut form = LoginForm::with_values("alice", "secret");

        let before = form.credentials();
        form.handle_event(KeyEvent::from(KeyCode::Char('!')));
        let after = form.credentials();

        assert_eq!(before.username, "alice");
        assert_eq!(after.username, "alice!");
    }

    #[test]
    fn rendering_in_a_tiny_terminal_does_not_panic() {
        let form = LoginForm::with_values("alice", "secret");
        let mut terminal = Terminal::new(TestBackend::new(4, 4)).unwrap();

        terminal
            .draw(|frame| form.render(frame.area(), frame))
            .unwrap();
    }
}
