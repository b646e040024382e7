// GitHub API HTTP client.
// Handles optional authentication, URL construction, and response status checks.

use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{GhEventsError, Result};

use super::types::ErrorResponse;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client rooted at a configurable base URL.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a new client against `api_base`, authenticating when a token is given.
    pub fn new(api_base: &str, token: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(api_base)
            .map_err(|e| GhEventsError::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GhEventsError::InvalidUrl(api_base.to_string()));
        }

        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| GhEventsError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("ghevents-cli"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GhEventsError::Api)?;

        Ok(Self { client, base_url })
    }

    /// Create a client, picking up GITHUB_TOKEN from the environment if set.
    ///
    /// The events feed is public, so a missing token is not an error.
    pub fn from_env(api_base: &str) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self::new(api_base, token.as_deref())
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Each segment is percent-encoded on its own, so a value containing
    /// `/`, `?` or `#` can never escape its segment.
    pub fn endpoint_url<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| GhEventsError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(GhEventsError::Api)?;
        self.check_response(response).await
    }

    /// Pass success responses through; decode anything else as a GitHub error body.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(GhEventsError::Api)?;
        let error: ErrorResponse = serde_json::from_str(&body)?;
        Err(GhEventsError::Upstream {
            message: error.message,
            status: status.as_u16(),
        })
    }
}
