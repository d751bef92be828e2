//! Review loader: text exports of businesses and reviews → REST backend.
//!
//! The export is parsed into a tree of businesses owning their reviews, then
//! uploaded in order so that every review carries the generated identifier
//! of its parent business.

#![warn(missing_docs)]
// env_logger and dotenvy are used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;
pub mod upload;

/// Re-export common error types for convenience.
pub use error::{LoaderError, Result};

/// Re-export the record types for convenience.
pub use model::{Business, Review};

/// Review loader version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
