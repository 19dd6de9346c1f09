use super::Action;
use crate::config::Config;
use cardroom_core::api::{self, login, Client};

/// Connections to external services that effects use. We keep these around
/// to have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Submit credentials to the server for a verdict
    SubmitLogin(login::Req),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the
    /// next `Action` the application needs to handle.
    ///
    /// A request that fails to settle maps to the quiet
    /// `Action::LoginErrored`. The log line written here is all the
    /// feedback that path gets.
    pub async fn run(self, conn: &EffectContext, config: &Config) -> Option<Action> {
        match self.run_inner(conn, config).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "login request failed");

                Some(Action::LoginErrored)
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to
    /// make it more ergonomic to write.
    async fn run_inner(
        self,
        conn: &EffectContext,
        config: &Config,
    ) -> Result<Option<Action>, Problem> {
        match self {
            Self::SubmitLogin(req) => {
                tracing::info!("submitting login");

                let client = Client::new(config.server().to_string());

                match client.login(&conn.http, &req).await? {
                    login::Outcome::Accepted => Ok(Some(Action::LoginAccepted(req.username))),
                    login::Outcome::Rejected(reason) => Ok(Some(Action::LoginRejected(reason))),
                }
            }
        }
    }
}

/// Things that can go wrong while running an `Effect`
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had trouble talking to the server, or it answered with something
    /// other than a login verdict.
    #[error("problem talking to the server: {0}")]
    Api(#[from] api::Error),
}
