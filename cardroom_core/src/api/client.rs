use super::error::Result;
use super::login;
use url::Url;

/// Client for the login API
#[derive(Debug, Clone)]
pub struct Client {
    /// The server to talk to. Should only be the protocol and domain, e.g.
    /// `http://cardroom.your-domain.com`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Submit credentials to the server and decode its verdict.
    ///
    /// The login endpoint reports success or failure in the body, so the
    /// HTTP status line is not consulted: a non-2xx answer that still
    /// carries the envelope decodes like any other, and an error page
    /// that doesn't ends up as `Error::Decode`.
    ///
    /// ## Errors
    ///
    /// - `Error::UrlParse` if the server address is not a valid base URL
    /// - `Error::Http` if the request could not be sent or the body could
    ///   not be read
    /// - `Error::Decode` if the body is not the login envelope
    /// - `Error::MissingReason` if the login was rejected with no message
    pub async fn login(
        &self,
        client: &reqwest::Client,
        req: &login::Req,
    ) -> Result<login::Outcome> {
        let url = Url::parse(&self.server)?.join(login::PATH)?;

        let body = client.post(url).json(req).send().await?.text().await?;
        let resp: login::Resp = serde_json::from_str(&body)?;

        resp.try_into()
    }
}
