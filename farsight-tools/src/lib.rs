//! Tool surface exposed to an agent or orchestrator.
//!
//! Three tools over the web stack: `web_search`, `fetch_and_parse_webpage`,
//! and `deep_research`. Every tool returns a human-readable string; soft
//! failures ("no results", "couldn't identify main content") are successful
//! returns with recognizable text, and only malformed arguments surface as
//! typed errors.

use std::sync::Arc;

use async_trait::async_trait;
use farsight_common::{FarsightError, Result};
use farsight_research::ResearchPipeline;
use farsight_web::{PageFetcher, SearchClient};
use serde_json::Value;

pub mod web;

pub use web::{DeepResearchTool, FetchParseTool, WebSearchTool};

/// One callable capability, described well enough for an LLM to invoke it.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema for the arguments `execute` accepts.
    fn parameters(&self) -> Value;

    /// Run the tool. `Err` is reserved for malformed arguments; every
    /// domain-level failure comes back as `Ok` with a descriptive string.
    async fn execute(&self, args: Value) -> Result<String>;
}

/// Get a required string argument from JSON.
fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| FarsightError::Tool(format!("Missing required argument: {key}")))
}

/// Get an optional string argument from JSON.
fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// Get an optional integer argument from JSON.
fn optional_usize(args: &Value, key: &str) -> Option<usize> {
    args.get(key).and_then(|v| v.as_u64()).map(|n| n as usize)
}

/// Create all web tools with shared collaborators. Tools are registered even
/// when no API key is configured; searches then fail at execution time.
pub fn all_tools(
    search: Arc<dyn SearchClient>,
    fetcher: Arc<dyn PageFetcher>,
) -> Vec<Arc<dyn Tool>> {
    let pipeline = Arc::new(ResearchPipeline::new(search.clone(), fetcher.clone()));
    vec![
        Arc::new(WebSearchTool::new(search)),
        Arc::new(FetchParseTool::new(fetcher)),
        Arc::new(DeepResearchTool::new(pipeline)),
    ]
}
