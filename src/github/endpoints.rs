// GitHub API endpoint functions.
// Typed methods for the REST endpoints ghevents reads.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::GithubEvent;

impl GitHubClient {
    /// Get the public events performed by a user.
    ///
    /// Only the first page GitHub returns is read.
    pub async fn get_user_events(&self, username: &str) -> Result<Vec<GithubEvent>> {
        let url = self.endpoint_url(["users", username, "events"])?;
        let response = self.get(url).await?;
        let body = response.text().await?;
        let events: Vec<GithubEvent> = serde_json::from_str(&body)?;
        Ok(events)
    }
}
