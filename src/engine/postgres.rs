//! Remote PostgreSQL session construction
//!
//! The remote backend is an in-memory DuckDB connection with the target
//! database attached read-only through the `postgres` extension. Queries
//! are forwarded to the server; no table catalog is populated locally.

use super::{Handle, ATTACH_ALIAS};
use crate::config::PostgresConfig;
use crate::error::{Error, Result};
use crate::types::BackendKind;
use duckdb::Connection;
use tracing::info;

/// Open a session against the configured PostgreSQL server
pub fn build_postgres(config: &PostgresConfig) -> Result<Handle> {
    let conn = Connection::open_in_memory()?;

    conn.execute_batch("INSTALL postgres; LOAD postgres;")
        .map_err(|e| Error::extension("postgres", e))?;

    let uri = config.uri();
    let attach_sql = format!(
        "ATTACH '{}' AS {ATTACH_ALIAS} (TYPE POSTGRES, READ_ONLY);",
        uri.replace('\'', "''")
    );
    conn.execute_batch(&attach_sql)
        .map_err(|e| Error::connection_refused(config.display_uri(), e))?;

    info!(server = %config.display_uri(), "attached PostgreSQL database");
    Ok(Handle::new(conn, BackendKind::Postgres))
}
