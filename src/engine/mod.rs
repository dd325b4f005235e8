//! Backend engine handles
//!
//! Every backend, local or remote, is reached through a [`Handle`] wrapping
//! a DuckDB connection. Local handles carry the dataset tables directly;
//! the PostgreSQL handle forwards queries to the attached server.

mod local;
mod postgres;

pub use local::build_local;
pub use postgres::build_postgres;

use crate::error::Result;
use crate::types::BackendKind;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use duckdb::Connection;
use tracing::debug;

/// Catalog alias the remote PostgreSQL database is attached under
pub const ATTACH_ALIAS: &str = "remote";

/// A ready-to-use connection to one backend
///
/// Owned by the registry; callers hold shared references and never take
/// ownership. Not thread-safe: the underlying DuckDB connection is meant
/// to be driven from one thread at a time.
pub struct Handle {
    conn: Connection,
    kind: BackendKind,
}

/// Result of running a query against a handle
pub struct QueryResult {
    /// Arrow schema of the result set
    pub schema: SchemaRef,
    /// Result rows as Arrow record batches
    pub batches: Vec<RecordBatch>,
    /// Total row count across all batches
    pub total_rows: usize,
}

impl Handle {
    fn new(conn: Connection, kind: BackendKind) -> Self {
        Self { conn, kind }
    }

    /// Which backend this handle belongs to
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Table names visible to this handle
    ///
    /// For the in-process backends this is the registered dataset catalog;
    /// for `postgres` the live listing is read from the server.
    pub fn tables(&self) -> Result<Vec<String>> {
        let query = match self.kind {
            BackendKind::Duckdb | BackendKind::Dataframe => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'main' \
                 ORDER BY table_name"
                    .to_string()
            }
            BackendKind::Postgres => format!(
                "SELECT table_schema || '.' || table_name AS full_name \
                 FROM {ATTACH_ALIAS}.information_schema.tables \
                 WHERE table_schema NOT IN ('pg_catalog', 'information_schema') \
                 ORDER BY table_schema, table_name"
            ),
        };

        let mut stmt = self.conn.prepare(&query)?;
        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(tables)
    }

    /// Execute SQL and collect the full result set
    pub fn query(&self, sql: &str) -> Result<QueryResult> {
        debug!(backend = %self.kind, sql, "executing query");

        let mut stmt = self.conn.prepare(sql)?;
        let arrow = stmt.query_arrow([])?;
        let schema = arrow.get_schema();

        let mut total_rows = 0usize;
        let batches: Vec<RecordBatch> = arrow
            .map(|batch| {
                total_rows += batch.num_rows();
                batch
            })
            .collect();

        debug!(
            backend = %self.kind,
            batch_count = batches.len(),
            total_rows,
            "query finished"
        );
        Ok(QueryResult {
            schema,
            batches,
            total_rows,
        })
    }

    /// Cheap liveness probe
    pub fn check(&self) -> Result<()> {
        let query = match self.kind {
            BackendKind::Duckdb | BackendKind::Dataframe => "SELECT 1".to_string(),
            BackendKind::Postgres => {
                format!("SELECT 1 FROM {ATTACH_ALIAS}.pg_catalog.pg_tables LIMIT 1")
            }
        };

        self.conn.execute(&query, [])?;
        Ok(())
    }
}
