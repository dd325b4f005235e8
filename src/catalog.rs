//! Dataset directory scanning
//!
//! A dataset directory holds zero or more Parquet files; each file becomes
//! one named table in the in-process engines. The table name is the file
//! name with the `.parquet` marker stripped, so `cows.parquet` registers
//! as `cows`. Everything else in the directory is ignored.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-name marker identifying a table source
pub const PARQUET_MARKER: &str = ".parquet";

/// One discovered table source: a derived table name and the file behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    /// Table name the file registers under
    pub name: String,
    /// Path of the backing Parquet file
    pub path: PathBuf,
}

/// Enumerate the table sources in a dataset directory
///
/// Returns sources sorted by table name so catalogs built from the same
/// directory always come out in the same order.
pub fn scan_dataset_dir(dir: &Path) -> Result<Vec<TableSource>> {
    if !dir.is_dir() {
        return Err(Error::directory_not_found(dir));
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(name) = file_name.strip_suffix(PARQUET_MARKER) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        debug!(table = name, file = file_name, "discovered table source");
        sources.push(TableSource {
            name: name.to_string(),
            path: entry.path(),
        });
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sources)
}
