//! Common types and utilities shared across Farsight crates.
//!
//! This crate defines the shared error type and the centralised tracing
//! setup used throughout the Farsight workspace. It is intentionally
//! lightweight and dependency‑minimal so that all crates can depend on it
//! without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`FarsightError`] and [`Result`]: Shared error handling
//! - [`observability`]: Centralised tracing/logging initialisation

pub mod observability;

/// Error types used across the Farsight system.
#[derive(thiserror::Error, Debug)]
pub enum FarsightError {
    /// A tool was invoked with malformed arguments.
    #[error("Tool error: {0}")]
    Tool(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`FarsightError`].
pub type Result<T> = std::result::Result<T, FarsightError>;
