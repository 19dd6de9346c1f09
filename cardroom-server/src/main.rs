//! The login server for cardroom clients.

/// The accounts allowed to sign in
mod directory;

/// Request handlers
mod handlers;

/// Shared state for requests
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use cardroom_core::api::login;
use clap::Parser;
use directory::UserDirectory;
use state::State;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{limit, timeout, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server options, from flags or the environment.
#[derive(Debug, Parser)]
struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:5000")]
    address: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "65536")]
    body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    request_timeout: Duration,

    /// A JSON file of accounts allowed to sign in, shaped like
    /// `{"username": "password"}`. Without it, the built-in development
    /// accounts are used.
    #[clap(long, env)]
    users_file: Option<PathBuf>,
}

/// Parse a whole number of seconds from the command line.
fn duration_parser(s: &str) -> Result<Duration, ParseIntError> {
    s.parse().map(Duration::from_secs)
}

#[tokio::main]
async fn main() {
    let options = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let directory = match &options.users_file {
        Some(path) => UserDirectory::from_file(path).expect("failed to load the users file"),
        None => {
            tracing::warn!("no users file given; using the built-in development accounts");

            UserDirectory::dev()
        }
    };
    tracing::info!(accounts = directory.len(), "loaded the user directory");

    let app = app(State::new(directory), &options);

    let listener = TcpListener::bind(&options.address).await.unwrap();
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app).await.unwrap();
}

/// The login endpoint, a health check, and the layers around them.
fn app(state: State, options: &Config) -> Router {
    Router::new()
        .route(login::PATH, post(handlers::login::handler))
        .route("/health", get(handlers::health::handler))
        .layer(trace::TraceLayer::new_for_http())
        .layer(limit::RequestBodyLimitLayer::new(options.body_limit))
        .layer(timeout::TimeoutLayer::new(options.request_timeout))
        .with_state(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use axum_test::TestServer;
    use cardroom_core::api::{login::Outcome, Client, Error};
    use serde_json::json;

    /// A router over the development accounts with default options
    fn test_app() -> Router {
        let options = Config::parse_from(["cardroom-server"]);

        app(State::new(UserDirectory::dev()), &options)
    }

    /// Serve a router on an OS-assigned port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{address}")
    }

    #[test_log::test(tokio::test)]
    async fn accepting_over_the_wire() {
        let server = TestServer::new(test_app()).unwrap();

        let response = server
            .post("/login")
            .json(&json!({"username": "user1", "password": "password1"}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<serde_json::Value>(),
            json!({"success": true}),
        );
    }

    #[test_log::test(tokio::test)]
    async fn rejecting_over_the_wire() {
        let server = TestServer::new(test_app()).unwrap();

        let response = server
            .post("/login")
            .json(&json!({"username": "user1", "password": "nope"}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<serde_json::Value>(),
            json!({"success": false, "message": "Invalid credentials"}),
        );
    }

    #[test_log::test(tokio::test)]
    async fn a_malformed_body_is_a_client_error() {
        let server = TestServer::new(test_app()).unwrap();

        let response = server.post("/login").text("not json").await;

        assert!(response.status_code().is_client_error());
    }

    #[test_log::test(tokio::test)]
    async fn a_missing_field_is_a_client_error() {
        let server = TestServer::new(test_app()).unwrap();

        let response = server
            .post("/login")
            .json(&json!({"username": "user1"}))
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[test_log::test(tokio::test)]
    async fn the_client_gets_a_verdict_end_to_end() {
        let server = serve(test_app()).await;
        let http = reqwest::Client::new();
        let client = Client::new(server);

        let accepted = client
            .login(
                &http,
                &login::Req {
                    username: "user1".to_string(),
                    password: "password1".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(accepted, Outcome::Accepted);

        let rejected = client
            .login(
                &http,
                &login::Req {
                    username: "user1".to_string(),
                    password: "nope".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(rejected, Outcome::Rejected("Invalid credentials".to_string()));
    }

    #[test_log::test(tokio::test)]
    async fn a_body_that_is_not_a_verdict_is_a_decode_error() {
        let router = Router::new().route(login::PATH, post(|| async { "nope" }));
        let server = serve(router).await;
        let http = reqwest::Client::new();
        let client = Client::new(server);

        let err = client
            .login(
                &http,
                &login::Req {
                    username: "user1".to_string(),
                    password: "password1".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[test_log::test(tokio::test)]
    async fn an_unreachable_server_is_an_http_error() {
        let http = reqwest::Client::new();
        let client = Client::new("http://127.0.0.1:9".to_string());

        let err = client
            .login(
                &http,
                &login::Req {
                    username: "user1".to_string(),
                    password: "password1".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(_)));
    }
}
