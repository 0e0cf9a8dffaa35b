use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::redirect::Policy;

/// Outcome of retrieving raw markup for one URL. Transport problems are data,
/// not errors: a failed page must never take down a whole research run.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success { markup: String },
    Failure { reason: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Seam for retrieving a page body as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Concrete fetcher over a dedicated reqwest client: browser user-agent,
/// bounded timeout, redirects followed. The body is read as text no matter
/// what content type the server declares.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        tracing::debug!(target: "web.fetch", url, "fetch.start");

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(target: "web.fetch", url, error = %e, "fetch.network_error");
                return FetchOutcome::Failure {
                    reason: e.to_string(),
                };
            }
        };

        let resp = match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(target: "web.fetch", url, error = %e, "fetch.status_error");
                return FetchOutcome::Failure {
                    reason: e.to_string(),
                };
            }
        };

        // FIXME(limits): bodies are read fully into memory; add a byte cap
        // before extraction ever sees multi-megabyte pages.
        match resp.text().await {
            Ok(markup) => {
                tracing::debug!(target: "web.fetch", url, bytes = markup.len(), "fetch.success");
                FetchOutcome::Success { markup }
            }
            Err(e) => {
                tracing::warn!(target: "web.fetch", url, error = %e, "fetch.body_error");
                FetchOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}
