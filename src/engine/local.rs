//! In-process engine construction
//!
//! One routine builds both local backends; [`RegistrationStyle`] selects
//! how the Parquet files get in. `Register` points a view at each file,
//! `Materialize` loads every file into Arrow batches first and wraps the
//! whole mapping at once. Either way the resulting handle exposes the same
//! catalog of named tables.

use super::Handle;
use crate::catalog::TableSource;
use crate::error::{Error, Result};
use crate::types::{BackendKind, RegistrationStyle};
use arrow::datatypes::{DataType, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use duckdb::Connection;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Build an in-process engine over the given table sources
///
/// A failure on any source aborts the whole build; a partially populated
/// handle is never returned.
pub fn build_local(sources: &[TableSource], style: RegistrationStyle) -> Result<Handle> {
    let conn = Connection::open_in_memory()?;

    match style {
        RegistrationStyle::Register => register_views(&conn, sources)?,
        RegistrationStyle::Materialize => materialize_tables(&conn, sources)?,
    }

    info!(%style, table_count = sources.len(), "built in-process engine");

    let kind = match style {
        RegistrationStyle::Register => BackendKind::Duckdb,
        RegistrationStyle::Materialize => BackendKind::Dataframe,
    };
    Ok(Handle::new(conn, kind))
}

/// Register a view over each Parquet file, one at a time
///
/// DuckDB binds the file schema when the view is created, so an unreadable
/// file fails here rather than at first query.
fn register_views(conn: &Connection, sources: &[TableSource]) -> Result<()> {
    for source in sources {
        let path = path_literal(&source.path);
        let sql = format!(
            "CREATE VIEW {} AS SELECT * FROM read_parquet('{}')",
            quote_ident(&source.name),
            path
        );
        debug!(table = %source.name, "registering view");
        conn.execute_batch(&sql)
            .map_err(|e| Error::file_unreadable(&source.path, e))?;
    }
    Ok(())
}

/// Load every Parquet file into memory, then wrap the mapping into tables
fn materialize_tables(conn: &Connection, sources: &[TableSource]) -> Result<()> {
    let mut frames: Vec<(&str, SchemaRef, Vec<RecordBatch>)> = Vec::with_capacity(sources.len());
    for source in sources {
        let (schema, batches) = load_parquet(&source.path)?;
        debug!(table = %source.name, batch_count = batches.len(), "materialized file");
        frames.push((source.name.as_str(), schema, batches));
    }

    for (name, schema, batches) in frames {
        conn.execute_batch(&create_table_sql(name, &schema)?)?;
        let mut appender = conn.appender(name)?;
        for batch in batches {
            appender.append_record_batch(batch)?;
        }
        appender.flush()?;
    }
    Ok(())
}

/// Read one Parquet file fully into Arrow record batches
fn load_parquet(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = File::open(path).map_err(|e| Error::file_unreadable(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::file_unreadable(path, e))?;
    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .map_err(|e| Error::file_unreadable(path, e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::file_unreadable(path, e))?;
    Ok((schema, batches))
}

/// DDL creating an empty table matching an Arrow schema
fn create_table_sql(table: &str, schema: &Schema) -> Result<String> {
    let mut columns = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let sql_type = sql_type(field.data_type(), table, field.name())?;
        columns.push(format!("{} {}", quote_ident(field.name()), sql_type));
    }
    Ok(format!(
        "CREATE TABLE {} ({})",
        quote_ident(table),
        columns.join(", ")
    ))
}

/// Map an Arrow data type to the DuckDB column type it appends as
fn sql_type(data_type: &DataType, table: &str, column: &str) -> Result<String> {
    let name = match data_type {
        DataType::Boolean => "BOOLEAN",
        DataType::Int8 => "TINYINT",
        DataType::Int16 => "SMALLINT",
        DataType::Int32 => "INTEGER",
        DataType::Int64 => "BIGINT",
        DataType::UInt8 => "UTINYINT",
        DataType::UInt16 => "USMALLINT",
        DataType::UInt32 => "UINTEGER",
        DataType::UInt64 => "UBIGINT",
        DataType::Float32 => "FLOAT",
        DataType::Float64 => "DOUBLE",
        DataType::Utf8 | DataType::LargeUtf8 => "VARCHAR",
        DataType::Binary | DataType::LargeBinary => "BLOB",
        DataType::Date32 | DataType::Date64 => "DATE",
        DataType::Timestamp(_, None) => "TIMESTAMP",
        DataType::Timestamp(_, Some(_)) => "TIMESTAMPTZ",
        DataType::Time32(_) | DataType::Time64(_) => "TIME",
        DataType::Decimal128(precision, scale) => {
            return Ok(format!("DECIMAL({precision},{scale})"));
        }
        other => {
            return Err(Error::UnsupportedType {
                table: table.to_string(),
                column: column.to_string(),
                type_name: format!("{other}"),
            });
        }
    };
    Ok(name.to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn path_literal(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::scan_dataset_dir;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::Field;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use test_case::test_case;

    fn herd_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("weight_kg", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec!["daisy", "bella", "rosie"])),
                Arc::new(Float64Array::from(vec![Some(412.5), None, Some(388.0)])),
            ],
        )
        .unwrap()
    }

    fn write_parquet(path: &Path, batch: &RecordBatch) {
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
    }

    fn dataset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_parquet(&dir.path().join("cows.parquet"), &herd_batch());
        write_parquet(&dir.path().join("fields.parquet"), &herd_batch());
        std::fs::write(dir.path().join("notes.txt"), "winter feed plan").unwrap();
        dir
    }

    #[test_case(RegistrationStyle::Register)]
    #[test_case(RegistrationStyle::Materialize)]
    fn test_build_local_tables(style: RegistrationStyle) {
        let dir = dataset_dir();
        let sources = scan_dataset_dir(dir.path()).unwrap();
        let handle = build_local(&sources, style).unwrap();

        assert_eq!(handle.tables().unwrap(), vec!["cows", "fields"]);
        handle.check().unwrap();
    }

    #[test_case(RegistrationStyle::Register)]
    #[test_case(RegistrationStyle::Materialize)]
    fn test_build_local_query(style: RegistrationStyle) {
        let dir = dataset_dir();
        let sources = scan_dataset_dir(dir.path()).unwrap();
        let handle = build_local(&sources, style).unwrap();

        let result = handle
            .query("SELECT name FROM cows WHERE id = 2 ORDER BY name")
            .unwrap();
        assert_eq!(result.total_rows, 1);

        let names = result.batches[0]
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(names.value(0), "bella");
    }

    #[test]
    fn test_styles_agree_on_catalog() {
        let dir = dataset_dir();
        let sources = scan_dataset_dir(dir.path()).unwrap();

        let registered = build_local(&sources, RegistrationStyle::Register).unwrap();
        let materialized = build_local(&sources, RegistrationStyle::Materialize).unwrap();
        assert_eq!(
            registered.tables().unwrap(),
            materialized.tables().unwrap()
        );
    }

    #[test_case(RegistrationStyle::Register)]
    #[test_case(RegistrationStyle::Materialize)]
    fn test_empty_sources(style: RegistrationStyle) {
        let handle = build_local(&[], style).unwrap();
        assert!(handle.tables().unwrap().is_empty());
        handle.check().unwrap();
    }

    #[test_case(RegistrationStyle::Register)]
    #[test_case(RegistrationStyle::Materialize)]
    fn test_unreadable_file_aborts_build(style: RegistrationStyle) {
        let dir = tempfile::tempdir().unwrap();
        write_parquet(&dir.path().join("cows.parquet"), &herd_batch());
        std::fs::write(dir.path().join("broken.parquet"), "not parquet at all").unwrap();

        let sources = scan_dataset_dir(dir.path()).unwrap();
        let err = build_local(&sources, style).unwrap_err();
        assert!(matches!(err, Error::FileUnreadable { .. }), "got {err}");
    }

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(sql_type(&DataType::Int64, "t", "c").unwrap(), "BIGINT");
        assert_eq!(sql_type(&DataType::Utf8, "t", "c").unwrap(), "VARCHAR");
        assert_eq!(
            sql_type(&DataType::Decimal128(10, 2), "t", "c").unwrap(),
            "DECIMAL(10,2)"
        );

        let list = DataType::List(Arc::new(Field::new("item", DataType::Int64, true)));
        assert!(matches!(
            sql_type(&list, "t", "c").unwrap_err(),
            Error::UnsupportedType { .. }
        ));
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("cows"), "\"cows\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }
}
