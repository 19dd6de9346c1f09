use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};
use std::process::ExitCode;

/// Things that can happen to this app
pub mod action;
pub use action::Action;

/// Things that can happen because of this app
pub mod effect;
pub use effect::{Effect, EffectContext};

/// The credentials form
pub mod login_form;
use login_form::LoginForm;

/// Modal states shown over a screen
pub mod popover;
use popover::Popover;

/// The "functional core" of the app. Input comes in as `Action`s, state
/// changes, and requests for the outside world leave as `Effect`s.
pub struct App {
    /// A line of text for the bottom of the screen. Usually a keyboard
    /// hint, but shell problems land here too.
    status_line: Option<String>,

    /// Which screen we're on
    state: AppState,
}

/// Where the app is in its lifecycle
#[derive(Debug)]
enum AppState {
    /// Collecting credentials
    Login(LoginScreen),

    /// Signed in
    Home(HomeScreen),

    /// Done, and wanting the given exit code once final effects settle
    Exiting(ExitCode),
}

impl AppState {
    /// Is a popover currently soaking up input on the login screen?
    fn is_blocked(&self) -> bool {
        matches!(self, Self::Login(login) if login.popover.is_some())
    }

    /// Is a login request currently outstanding?
    fn is_in_flight(&self) -> bool {
        matches!(self, Self::Login(login) if login.in_flight)
    }

    /// The neutral status-line hint for this state
    fn hint(&self) -> &'static str {
        match self {
            Self::Login(login) if login.popover.is_some() => "enter/esc: dismiss",
            Self::Login(login) if login.in_flight => "Signing in…",
            Self::Login(_) => "tab: switch field, enter: sign in, F1: help, esc: quit",
            Self::Home(_) => "l: log out, q: quit",
            Self::Exiting(_) => "",
        }
    }
}

/// State while we're collecting credentials
#[derive(Debug, Default)]
struct LoginScreen {
    /// The credentials form
    form: LoginForm,

    /// Whether a login request is outstanding. While this is set, submits
    /// are ignored. It clears only once the request settles, whichever way
    /// it settles.
    in_flight: bool,

    /// A modal shown over the form
    popover: Option<Popover>,
}

/// State once someone has signed in
#[derive(Debug)]
struct HomeScreen {
    /// Who signed in
    username: String,

    /// When the server accepted the login
    signed_in_at: DateTime<Local>,
}

impl HomeScreen {
    /// Render the home screen
    fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        let text = Text::from(vec![
            Line::from(format!("Welcome, {}!", self.username)),
            Line::from(format!(
                "Signed in at {}",
                self.signed_in_at.to_rfc2822()
            )),
        ]);

        let home = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Home")
                .padding(Padding::horizontal(1)),
        );

        frame.render_widget(home, body_area);
    }
}

impl App {
    /// Create a new instance of the app, starting on the login screen
    pub fn new() -> Self {
        Self {
            status_line: None,
            state: AppState::Login(LoginScreen::default()),
        }
    }

    /// Handle an `Action`, updating the app's state and producing some
    /// side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),

            Action::LoginAccepted(username) => {
                if matches!(self.state, AppState::Login(_)) {
                    self.state = AppState::Home(HomeScreen {
                        username,
                        signed_in_at: Local::now(),
                    });
                }

                vec![]
            }

            Action::LoginRejected(reason) => {
                self.map_login_mut(|login| {
                    login.in_flight = false;
                    login.popover = Some(Popover::Alert(reason));
                });

                vec![]
            }

            Action::LoginErrored => {
                // The request never settled. The error is already in the
                // log, and the form goes back to accepting input with no
                // visible change.
                self.map_login_mut(|login| login.in_flight = false);

                vec![]
            }

            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Handle a key press, routing it according to the current screen and
    /// any modal state
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        // a quit chord that works no matter what the screen shows
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Exiting(ExitCode::SUCCESS);
            return vec![];
        }

        if self.state.is_blocked() {
            self.map_login_mut(|login| {
                let dismiss = match &login.popover {
                    Some(Popover::Help) => {
                        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::F(1))
                    }
                    Some(Popover::Alert(_)) => {
                        matches!(key.code, KeyCode::Enter | KeyCode::Esc)
                    }
                    None => false,
                };

                if dismiss {
                    login.popover = None;
                }
            });

            // everything else is swallowed; the popover is modal
            return vec![];
        }

        if self.state.is_in_flight() {
            // no double submits and no edits while a request is out
            return vec![];
        }

        match &self.state {
            AppState::Login(_) => match key.code {
                KeyCode::Enter => self
                    .map_login_mut(|login| {
                        login.in_flight = true;

                        vec![Effect::SubmitLogin(login.form.credentials())]
                    })
                    .unwrap_or_default(),

                KeyCode::F(1) => {
                    self.map_login_mut(|login| login.popover = Some(Popover::Help));

                    vec![]
                }

                KeyCode::Esc => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }

                _ => {
                    self.map_login_mut(|login| login.form.handle_event(key));

                    vec![]
                }
            },

            AppState::Home(_) => match key.code {
                KeyCode::Char('q') => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }

                KeyCode::Char('l') => {
                    // log out: back to a fresh form with nothing remembered
                    self.state = AppState::Login(LoginScreen::default());

                    vec![]
                }

                _ => vec![],
            },

            AppState::Exiting(_) => vec![],
        }
    }

    /// Do something to the login screen, if that's where we are
    fn map_login_mut<T>(&mut self, edit: impl FnOnce(&mut LoginScreen) -> T) -> Option<T> {
        if let AppState::Login(login) = &mut self.state {
            Some(edit(login))
        } else {
            None
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame<'_>) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Login(login) => {
                login.form.render(body_area, frame);

                if let Some(popover) = &login.popover {
                    popover.render(frame, body_area);
                }
            }

            AppState::Home(home) => home.render(body_area, frame),

            AppState::Exiting(_) => {
                frame.render_widget(Paragraph::new("Exiting…"), body_area);
            }
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => self.state.hint(),
        });

        frame.render_widget(status, status_area);
    }

    /// Should we exit? If so, with what code?
    pub fn should_exit(&self) -> Option<ExitCode> {
        match self.state {
            AppState::Exiting(code) => Some(code),
            AppState::Login(_) | AppState::Home(_) => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
