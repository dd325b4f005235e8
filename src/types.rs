//! Common types shared across the crate

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of backends the registry can hand out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-process DuckDB engine with one view per Parquet file
    #[default]
    Duckdb,

    /// In-process engine built from fully materialized Arrow tables
    Dataframe,

    /// Live PostgreSQL session attached through DuckDB
    Postgres,
}

impl BackendKind {
    /// Every member of the closed set, in lookup order
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Duckdb,
        BackendKind::Dataframe,
        BackendKind::Postgres,
    ];

    /// Canonical identifier string
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Duckdb => "duckdb",
            BackendKind::Dataframe => "dataframe",
            BackendKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duckdb" => Ok(BackendKind::Duckdb),
            "dataframe" => Ok(BackendKind::Dataframe),
            "postgres" => Ok(BackendKind::Postgres),
            other => Err(Error::unknown_backend(other)),
        }
    }
}

/// How the in-process engine is populated from the dataset directory
///
/// Both styles end up with the same catalog of named tables behind the
/// same query interface; they differ only in how the Parquet files are
/// brought in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStyle {
    /// Register a view over each file against a live engine, one at a time
    #[default]
    Register,

    /// Load every file into memory first, then wrap the whole mapping at once
    Materialize,
}

impl RegistrationStyle {
    /// Canonical identifier string
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStyle::Register => "register",
            RegistrationStyle::Materialize => "materialize",
        }
    }
}

impl fmt::Display for RegistrationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("duckdb", BackendKind::Duckdb)]
    #[test_case("dataframe", BackendKind::Dataframe)]
    #[test_case("postgres", BackendKind::Postgres)]
    fn test_backend_kind_from_str(name: &str, expected: BackendKind) {
        assert_eq!(name.parse::<BackendKind>().unwrap(), expected);
        assert_eq!(expected.as_str(), name);
    }

    #[test_case("pandas"; "retired identifier")]
    #[test_case("DUCKDB"; "wrong case")]
    #[test_case(""; "empty string")]
    fn test_backend_kind_rejects(name: &str) {
        let err = name.parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownBackend { .. }));
    }

    #[test]
    fn test_backend_kind_default() {
        assert_eq!(BackendKind::default(), BackendKind::Duckdb);
    }

    #[test]
    fn test_all_covers_every_identifier() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.as_str().parse::<BackendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_registration_style_display() {
        assert_eq!(RegistrationStyle::Register.to_string(), "register");
        assert_eq!(RegistrationStyle::Materialize.to_string(), "materialize");
        assert_eq!(RegistrationStyle::default(), RegistrationStyle::Register);
    }

    #[test]
    fn test_serde_round_trip() {
        let yaml = serde_yaml::to_string(&BackendKind::Dataframe).unwrap();
        assert_eq!(yaml.trim(), "dataframe");
        let back: BackendKind = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, BackendKind::Dataframe);
    }
}
