//! Bibgraph Common Library
//!
//! Shared code for the bibgraph crates including:
//! - Paper records and derived graph datasets
//! - Error types and exit code mapping
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::errors::{AppError, ErrorCode, Result};
pub use crate::models::{
    Author, AuthorEntry, AuthoredPaper, CitationEntry, CitedPaper, Coauthorship,
    CoauthorshipDataset, PaperRecord,
};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default substring selecting source markup files
pub const DEFAULT_SOURCE_MARKER: &str = ".xml";

/// Separator between forename and surname in an author key
pub const AUTHOR_KEY_SEPARATOR: &str = "-";

/// Separator between the two author keys of a pair key
pub const PAIR_KEY_SEPARATOR: &str = "_";
