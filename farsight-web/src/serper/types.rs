use serde::{Deserialize, Serialize};

/// Request body for the Serper search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "q")]
    pub query: String,

    /// Requested result count.
    pub num: u32,
}

/// Response envelope. Everything except `organic` is ignored, and a missing
/// `organic` key reads as zero results rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchApiResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

/// One organic (non-ad) result as the provider reports it. Absent fields get
/// placeholder text here so nothing downstream ever sees a missing value.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    #[serde(default = "missing_title")]
    pub title: String,

    #[serde(default = "missing_link")]
    pub link: String,

    #[serde(default = "missing_snippet")]
    pub snippet: String,
}

fn missing_title() -> String {
    "No title".into()
}

fn missing_link() -> String {
    "No link".into()
}

fn missing_snippet() -> String {
    "No description available".into()
}

/// A search hit in provider relevance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl From<OrganicResult> for SearchResult {
    fn from(raw: OrganicResult) -> Self {
        Self {
            title: raw.title,
            url: raw.link,
            snippet: raw.snippet,
        }
    }
}
