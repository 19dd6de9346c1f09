use crate::directory::UserDirectory;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared state needed by requests.
#[derive(Clone, FromRef)]
pub struct State {
    /// The accounts allowed to sign in.
    directory: Arc<UserDirectory>,
}

impl State {
    /// Create a new state.
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}
