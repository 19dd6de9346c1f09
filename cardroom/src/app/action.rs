use crossterm::event::KeyEvent;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The server accepted a login for this username
    LoginAccepted(String),

    /// The server rejected a login, giving a reason to show the user
    LoginRejected(String),

    /// A login request failed to settle at all. The details are already in
    /// the log, so this carries nothing.
    LoginErrored,

    /// Something went wrong in the shell that the user should know about
    Problem(String),
}
