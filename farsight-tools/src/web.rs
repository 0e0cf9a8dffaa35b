//! The three web tools: search, fetch-and-parse, deep research.

use std::sync::Arc;

use async_trait::async_trait;
use farsight_common::Result;
use farsight_research::ResearchPipeline;
use farsight_web::extract;
use farsight_web::{ExtractionMode, FetchOutcome, PageFetcher, SearchClient, SearchResult};
use serde_json::{json, Value};

use crate::{optional_str, optional_usize, required_str, Tool};

const DEFAULT_NUM_RESULTS: usize = 5;
const DEFAULT_DEPTH: usize = 2;

/// Render one hit the way the search tool reports it.
fn format_search_result(result: &SearchResult) -> String {
    format!(
        "\nTitle: {}\nURL: {}\nSnippet: {}\n",
        result.title, result.url, result.snippet
    )
}

// ============================================================================
// web_search
// ============================================================================

/// Search the web and report formatted results.
pub struct WebSearchTool {
    search: Arc<dyn SearchClient>,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web for the given query and return formatted results with \
         titles, URLs, and snippets."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let query = required_str(&args, "query")?;
        let num_results = optional_usize(&args, "num_results").unwrap_or(DEFAULT_NUM_RESULTS);

        let results = match self.search.search(query, num_results).await {
            Ok(results) => results,
            Err(e) => return Ok(format!("Error performing search: {e}")),
        };
        if results.is_empty() {
            return Ok("No results found for your query.".to_string());
        }

        let formatted: Vec<String> = results
            .iter()
            .take(num_results)
            .map(format_search_result)
            .collect();
        Ok(formatted.join("\n---\n"))
    }
}

// ============================================================================
// fetch_and_parse_webpage
// ============================================================================

/// Fetch one page and return a selected extraction view of it.
pub struct FetchParseTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl FetchParseTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for FetchParseTool {
    fn name(&self) -> &'static str {
        "fetch_and_parse_webpage"
    }

    fn description(&self) -> &'static str {
        "Fetch a webpage and extract content based on extraction_type: \
         'full_text', 'main_content', 'headings', or 'links'."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL of the webpage to fetch and parse"
                },
                "extraction_type": {
                    "type": "string",
                    "enum": ["full_text", "main_content", "headings", "links"],
                    "description": "Type of content to extract (default: full_text)"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let url = required_str(&args, "url")?;
        let extraction_type = optional_str(&args, "extraction_type").unwrap_or("full_text");

        let markup = match self.fetcher.fetch(url).await {
            FetchOutcome::Success { markup } => markup,
            FetchOutcome::Failure { reason } => {
                return Ok(format!("Error fetching page: {reason}"));
            }
        };

        // Mode validation happens after the fetch, so an unreachable page
        // reports the fetch problem rather than the mode problem.
        match ExtractionMode::from_name(extraction_type) {
            Some(mode) => Ok(extract::extract(&markup, mode)),
            None => Ok(extract::invalid_mode_message(extraction_type)),
        }
    }
}

// ============================================================================
// deep_research
// ============================================================================

/// Multi-stage research over the top search results.
pub struct DeepResearchTool {
    pipeline: Arc<ResearchPipeline>,
}

impl DeepResearchTool {
    pub fn new(pipeline: Arc<ResearchPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl Tool for DeepResearchTool {
    fn name(&self) -> &'static str {
        "deep_research"
    }

    fn description(&self) -> &'static str {
        "Perform multi-stage research on a topic by searching and then \
         exploring the top results in depth."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The research topic"
                },
                "depth": {
                    "type": "integer",
                    "description": "How many top search results to explore (default: 2)"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let topic = required_str(&args, "topic")?;
        let depth = optional_usize(&args, "depth").unwrap_or(DEFAULT_DEPTH);
        Ok(self.pipeline.research(topic, depth).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::all_tools;
    use farsight_common::FarsightError;
    use farsight_web::SearchError;

    struct StubSearch(std::result::Result<Vec<SearchResult>, String>);

    #[async_trait]
    impl SearchClient for StubSearch {
        async fn search(
            &self,
            _query: &str,
            count: usize,
        ) -> std::result::Result<Vec<SearchResult>, SearchError> {
            match &self.0 {
                Ok(results) => Ok(results.iter().take(count).cloned().collect()),
                Err(message) => Err(SearchError {
                    message: message.clone(),
                }),
            }
        }
    }

    struct StubFetcher(FetchOutcome);

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> FetchOutcome {
            self.0.clone()
        }
    }

    fn hit(n: usize) -> SearchResult {
        SearchResult {
            title: format!("Result {n}"),
            url: format!("https://site{n}.example/"),
            snippet: format!("snippet {n}"),
        }
    }

    #[tokio::test]
    async fn web_search_formats_blocks_with_delimiter() {
        let tool = WebSearchTool::new(Arc::new(StubSearch(Ok(vec![hit(1), hit(2)]))));

        let out = tool
            .execute(json!({"query": "rust ownership", "num_results": 3}))
            .await
            .unwrap();

        assert_eq!(out.matches("Title: ").count(), 2);
        assert_eq!(out.matches("\n---\n").count(), 1);
        assert!(out.contains("\nTitle: Result 1\nURL: https://site1.example/\nSnippet: snippet 1\n"));
    }

    #[tokio::test]
    async fn web_search_reports_provider_failure_as_text() {
        let tool = WebSearchTool::new(Arc::new(StubSearch(Err("timeout".into()))));
        let out = tool.execute(json!({"query": "x"})).await.unwrap();
        assert_eq!(out, "Error performing search: timeout");
    }

    #[tokio::test]
    async fn web_search_reports_empty_results_as_text() {
        let tool = WebSearchTool::new(Arc::new(StubSearch(Ok(vec![]))));
        let out = tool.execute(json!({"query": "x"})).await.unwrap();
        assert_eq!(out, "No results found for your query.");
    }

    #[tokio::test]
    async fn web_search_requires_a_query() {
        let tool = WebSearchTool::new(Arc::new(StubSearch(Ok(vec![]))));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, FarsightError::Tool(_)));
    }

    #[tokio::test]
    async fn fetch_parse_defaults_to_full_text() {
        let tool = FetchParseTool::new(Arc::new(StubFetcher(FetchOutcome::Success {
            markup: "<p>hello</p><script>skip</script>".into(),
        })));

        let out = tool
            .execute(json!({"url": "https://site.example/"}))
            .await
            .unwrap();

        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn fetch_parse_rejects_unknown_modes_with_literal_message() {
        let tool = FetchParseTool::new(Arc::new(StubFetcher(FetchOutcome::Success {
            markup: "<p>hello</p>".into(),
        })));

        let out = tool
            .execute(json!({"url": "https://site.example/", "extraction_type": "bogus_mode"}))
            .await
            .unwrap();

        assert_eq!(
            out,
            "Invalid extraction_type: bogus_mode. Valid options are 'full_text', \
             'main_content', 'headings', or 'links'."
        );
    }

    #[tokio::test]
    async fn fetch_parse_reports_fetch_failure_as_text() {
        let tool = FetchParseTool::new(Arc::new(StubFetcher(FetchOutcome::Failure {
            reason: "404 Not Found".into(),
        })));

        let out = tool
            .execute(json!({"url": "https://site.example/missing"}))
            .await
            .unwrap();

        assert_eq!(out, "Error fetching page: 404 Not Found");
    }

    #[tokio::test]
    async fn deep_research_delegates_to_the_pipeline() {
        let search: Arc<dyn SearchClient> = Arc::new(StubSearch(Ok(vec![])));
        let fetcher: Arc<dyn PageFetcher> = Arc::new(StubFetcher(FetchOutcome::Failure {
            reason: "unused".into(),
        }));
        let tool = DeepResearchTool::new(Arc::new(ResearchPipeline::new(search, fetcher)));

        let out = tool.execute(json!({"topic": "rust"})).await.unwrap();
        assert_eq!(out, "No results found for your topic.");
    }

    #[test]
    fn all_tools_registers_every_tool() {
        let search: Arc<dyn SearchClient> = Arc::new(StubSearch(Ok(vec![])));
        let fetcher: Arc<dyn PageFetcher> = Arc::new(StubFetcher(FetchOutcome::Failure {
            reason: "unused".into(),
        }));

        let tools = all_tools(search, fetcher);
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec!["web_search", "fetch_and_parse_webpage", "deep_research"]
        );
    }

    #[test]
    fn tool_metadata_is_complete() {
        let search: Arc<dyn SearchClient> = Arc::new(StubSearch(Ok(vec![])));
        let fetcher: Arc<dyn PageFetcher> = Arc::new(StubFetcher(FetchOutcome::Failure {
            reason: "unused".into(),
        }));

        for tool in all_tools(search, fetcher) {
            assert!(!tool.description().is_empty());
            let params = tool.parameters();
            assert_eq!(params["type"], "object");
            assert!(params["required"].is_array());
        }
    }
}
