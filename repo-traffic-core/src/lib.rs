//! repo-traffic Core Library
//!
//! This library contains the core functionality for repo-traffic, a small tool
//! that pulls GitHub's per-repository clone and view traffic and keeps it in CSV
//! files. It provides the GitHub client, the traffic tables, the CSV writers and
//! the pipeline tying them together.

pub mod constants;
pub mod context;
pub mod error;
pub mod fetch;
pub mod github;
pub mod pipeline;
pub mod traffic;
pub mod writer;

// Re-export commonly used items
pub use context::Context;
pub use error::{Result, TrafficError};
pub use fetch::{fetch_traffic, RepoFilter, TrafficSource};
pub use github::GitHubClient;
pub use pipeline::{run, RunReport};
pub use traffic::{DetailRow, SummaryRow, TrafficPoint, TrafficTables};
