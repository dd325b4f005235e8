// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Paddock
//!
//! A named analytical-backend registry over a directory of Parquet files,
//! with an optional live PostgreSQL attachment.
//!
//! Three backends share one lookup interface:
//!
//! - **duckdb**: in-process DuckDB engine, one view per Parquet file
//! - **dataframe**: in-process engine built from fully materialized Arrow tables
//! - **postgres**: live PostgreSQL session attached through DuckDB
//!
//! Handles are built lazily on first request and cached, so an unreachable
//! database server never gets in the way of the local backends.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paddock::{Registry, RegistryConfig};
//!
//! fn main() -> paddock::Result<()> {
//!     let config = RegistryConfig::load(None)?;
//!     let registry = Registry::new(config);
//!
//!     // Configured default backend
//!     let handle = registry.connect_default()?;
//!     println!("tables: {:?}", handle.tables()?);
//!
//!     // Or pick one by name
//!     let frames = registry.connect_named("dataframe")?;
//!     let result = frames.query("SELECT count(*) FROM cows")?;
//!     println!("{} rows", result.total_rows);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(missing_docs)] // TODO: document the error variants before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and identifiers
pub mod types;

/// Registry configuration
pub mod config;

/// Dataset directory scanning
pub mod catalog;

/// Backend engine handles
pub mod engine;

/// The connection registry
pub mod registry;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::TableSource;
pub use config::{PostgresConfig, RegistryConfig};
pub use engine::{Handle, QueryResult};
pub use error::{Error, Result};
pub use registry::Registry;
pub use types::{BackendKind, RegistrationStyle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
