use super::types::{SearchApiResponse, SearchRequest, SearchResult};
use async_trait::async_trait;
use farsight_http::{Auth, HttpClient, HttpError, RequestOpts};
use reqwest::header::{HeaderName, HeaderValue};
use std::time::Instant;

/// A search call failed outright (network, timeout, HTTP status). Distinct
/// from a successful call that simply matched nothing, which is `Ok(vec![])`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SearchError {
    pub message: String,
}

impl SearchError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Seam for issuing one search query against a provider.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Return up to `count` results in provider order. An empty vector means
    /// the provider answered but found nothing.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError>;
}

/// Client for the Serper search API (Google results, web vertical).
#[derive(Clone)]
pub struct SerperClient {
    http: HttpClient,
    api_key: String,
}

impl SerperClient {
    pub fn new(endpoint: &str, api_key: String) -> Result<Self, HttpError> {
        let http = HttpClient::new(endpoint)?;
        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl SearchClient for SerperClient {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        let req = SearchRequest {
            query: query.to_string(),
            num: count.max(1) as u32,
        };

        let query_snippet: String = if query.chars().count() > 160 {
            query.chars().take(160).chain("…".chars()).collect()
        } else {
            query.to_string()
        };

        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| SearchError::new(format!("invalid API key header: {e}")))?;

        let started = Instant::now();
        tracing::info!(
            target: "web.serper",
            query = %query_snippet,
            num = req.num,
            "serper.search.start"
        );

        let resp: SearchApiResponse = match self
            .http
            .post_json(
                "search",
                &req,
                RequestOpts {
                    auth: Some(Auth::Header {
                        name: HeaderName::from_static("x-api-key"),
                        value: key,
                    }),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(resp) => resp,
            // An unexpected body shape reads as zero results, not a failure.
            Err(HttpError::Decode(err, snippet)) => {
                tracing::warn!(
                    target: "web.serper",
                    query = %query_snippet,
                    error = %err,
                    body_snippet = %snippet,
                    "serper.search.unexpected_shape"
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(
                    target: "web.serper",
                    query = %query_snippet,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "serper.search.error"
                );
                return Err(SearchError::new(e.to_string()));
            }
        };

        let hits: Vec<SearchResult> = resp.organic.into_iter().map(SearchResult::from).collect();
        tracing::info!(
            target: "web.serper",
            query = %query_snippet,
            elapsed_ms = started.elapsed().as_millis() as u64,
            hit_count = hits.len(),
            "serper.search.success"
        );
        Ok(hits)
    }
}
