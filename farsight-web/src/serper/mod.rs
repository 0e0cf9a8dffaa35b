pub mod client;
pub mod types;

pub use client::{SearchClient, SearchError, SerperClient};
pub use types::SearchResult;
