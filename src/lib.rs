//! # opendata-export
//!
//! Archives civic participation open data from a GraphQL API into paginated
//! CSV and JSON files.
//!
//! Four data kinds are exported: proposals (by collect step), questionnaire
//! replies, events and users. Each target is walked with cursor pagination,
//! every node is flattened into one record, and the record lands in two
//! sinks: a JSON array and a CSV table with per-question columns.
//!
//! Without an API token the export is anonymized: identifying fields
//! (emails, usernames, communication consent) never reach the output files.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Runner                            │
//! │   one run dir, one client, one reporter, N targets       │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────┬───────────────┴──────────┬───────────────────┐
//! │ GraphQL  │        Export loop       │      Output       │
//! ├──────────┼──────────────────────────┼───────────────────┤
//! │ queries  │ cursor pagination        │ JSON array sink   │
//! │ retry    │ format + flatten         │ CSV sink          │
//! │ envelope │ progress per target      │                   │
//! └──────────┴──────────────────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the exporter
pub mod error;

/// Common types and type aliases
pub mod types;

/// Exporter configuration and compile-time defaults
pub mod config;

/// GraphQL transport and wire model
pub mod graphql;

/// Record formatting and response flattening
pub mod format;

/// JSON and CSV output sinks
pub mod output;

/// The cursor-pagination export loop
pub mod export;

/// Built-in export targets
pub mod targets;

/// Progress display
pub mod progress;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExporterConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
