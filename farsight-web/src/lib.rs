//! Web discovery and acquisition utilities.
//!
//! - Serper search API client (`serper`) for discovery
//! - Page retrieval trait and reqwest-backed implementation (`fetch`)
//! - Pure HTML extraction (`extract`)

pub mod extract;
pub mod fetch;
pub mod serper;

pub use extract::ExtractionMode;
pub use fetch::{FetchOutcome, HttpPageFetcher, PageFetcher};
pub use serper::{SearchClient, SearchError, SearchResult, SerperClient};
