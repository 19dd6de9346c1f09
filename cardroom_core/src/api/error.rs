use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while processing requests
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We encountered an HTTP error, for example if we couldn't reach the
    /// server at all.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a body that doesn't decode as the login
    /// envelope, for example an HTML error page.
    #[error("could not decode the response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server rejected the login but attached no message to show the
    /// user.
    #[error("the server rejected the login without giving a reason")]
    MissingReason,
}
