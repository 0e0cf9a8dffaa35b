use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use farsight_common::observability::{init_logging, LogConfig};
use farsight_config::{FarsightConfig, FarsightConfigLoader};
use farsight_research::ResearchPipeline;
use farsight_tools::{DeepResearchTool, FetchParseTool, Tool, WebSearchTool};
use farsight_web::{HttpPageFetcher, PageFetcher, SearchClient, SerperClient};
use serde_json::json;

#[derive(Parser)]
#[command(name = "farsight", about = "Web search, page extraction, and deep research")]
struct Cli {
    /// Optional configuration file; environment variables always win.
    #[arg(long, default_value = "farsight.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the web and print formatted results.
    Search {
        query: String,
        #[arg(long, default_value_t = 5)]
        num_results: usize,
    },
    /// Fetch one page and print an extraction view of it.
    Fetch {
        url: String,
        #[arg(long, default_value = "full_text")]
        extraction_type: String,
    },
    /// Run multi-stage research on a topic and print the report.
    Research {
        topic: String,
        #[arg(long)]
        depth: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins), then wire logging before any network call.
    let cfg: FarsightConfig = FarsightConfigLoader::new().with_file(&cli.config).load()?;
    let log_path = init_logging(LogConfig::default())?;
    tracing::debug!(log_path = %log_path.display(), "farsight starting");

    let search: Arc<dyn SearchClient> = Arc::new(SerperClient::new(
        &cfg.search.endpoint,
        cfg.search.api_key.clone(),
    )?);
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(
        &cfg.fetch.user_agent,
        Duration::from_secs(cfg.fetch.timeout_secs),
    )?);

    let output = match cli.command {
        Command::Search { query, num_results } => {
            WebSearchTool::new(search)
                .execute(json!({"query": query, "num_results": num_results}))
                .await?
        }
        Command::Fetch {
            url,
            extraction_type,
        } => {
            FetchParseTool::new(fetcher)
                .execute(json!({"url": url, "extraction_type": extraction_type}))
                .await?
        }
        Command::Research { topic, depth } => {
            let depth = depth.unwrap_or(cfg.research.default_depth);
            let pipeline = Arc::new(ResearchPipeline::new(search, fetcher));
            DeepResearchTool::new(pipeline)
                .execute(json!({"topic": topic, "depth": depth}))
                .await?
        }
    };

    println!("{output}");
    Ok(())
}
