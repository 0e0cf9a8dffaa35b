//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - Request options: headers, `Auth`, timeout
//! - Logs only the auth *kind* (bearer/header/none), never secret values
//! - One request per call: there is no retry loop, callers see the first
//!   failure as-is
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), farsight_http::HttpError> {
//! let client = farsight_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .post_json("v1/items", &serde_json::json!({"q": "term"}), farsight_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Authentication strategies supported by the HTTP client helpers.
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Custom header (e.g., Serper: X-API-KEY)
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    None,
}

/// Per-request tuning knobs for the HTTP client.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use farsight_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(30));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(30),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut rb = self.inner.request(Method::POST, url.clone());
        rb = rb.timeout(timeout).json(body);

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        match &opts.auth {
            Some(Auth::Bearer(tok)) => {
                rb = rb.bearer_auth(sanitize_api_key(tok)?);
            }
            Some(Auth::Header { name, value }) => {
                rb = rb.header(name, value);
            }
            Some(Auth::None) | None => {}
        }

        let auth_kind = match &opts.auth {
            Some(Auth::Bearer(_)) => "bearer",
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };
        tracing::debug!(
            method = "POST",
            host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms = timeout.as_millis() as u64,
            auth_kind,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let snippet = snip_body(&bytes);

        tracing::debug!(
            %status,
            duration_ms = t0.elapsed().as_millis() as u64,
            body_len = bytes.len(),
            "http.response"
        );

        if !status.is_success() {
            let message = extract_error_message(&bytes);
            tracing::warn!(%status, message = %message, body_snippet = %snippet, "http.error");
            return Err(HttpError::Api { status, message });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!(
                serde_err = %e,
                body_snippet = %snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }
}

/// Pull a human-readable message out of a JSON error body, falling back to a
/// snippet of the raw bytes.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

/// Trim quotes and whitespace out of a pasted key and reject values that can
/// never form a valid Authorization header.
fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}
