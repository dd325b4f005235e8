//! CLI command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::config::RegistryConfig;
use crate::engine::{Handle, QueryResult};
use crate::error::Result;
use crate::registry::Registry;
use arrow::json::LineDelimitedWriter;
use std::sync::Arc;

/// Executes a parsed CLI invocation against a freshly loaded registry
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for a parsed invocation
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected subcommand
    pub fn run(&self) -> Result<()> {
        let config = RegistryConfig::load(self.cli.config.as_deref())?;
        let registry = Registry::new(config);

        match &self.cli.command {
            Commands::Backends => self.run_backends(&registry),
            Commands::Tables => self.run_tables(&registry),
            Commands::Check => self.run_check(&registry),
            Commands::Query { sql } => self.run_query(&registry, sql),
        }
    }

    /// Resolve the backend the invocation asked for
    fn select(&self, registry: &Registry) -> Result<Arc<Handle>> {
        match &self.cli.backend {
            Some(name) => registry.connect_named(name),
            None => registry.connect_default(),
        }
    }

    fn run_backends(&self, registry: &Registry) -> Result<()> {
        let default = registry.config().default_backend;
        match self.cli.format {
            OutputFormat::Json => {
                let names: Vec<&str> = registry.backends().iter().map(|k| k.as_str()).collect();
                let out = serde_json::json!({
                    "backends": names,
                    "default": default.as_str(),
                });
                println!("{out}");
            }
            OutputFormat::Pretty => {
                for kind in registry.backends() {
                    let marker = if *kind == default { " (default)" } else { "" };
                    println!("{kind}{marker}");
                }
            }
        }
        Ok(())
    }

    fn run_tables(&self, registry: &Registry) -> Result<()> {
        let handle = self.select(registry)?;
        let tables = handle.tables()?;
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&tables)?);
            }
            OutputFormat::Pretty => {
                for table in &tables {
                    println!("{table}");
                }
            }
        }
        Ok(())
    }

    fn run_check(&self, registry: &Registry) -> Result<()> {
        let handle = self.select(registry)?;
        handle.check()?;
        println!("{}: ok", handle.kind());
        Ok(())
    }

    fn run_query(&self, registry: &Registry, sql: &str) -> Result<()> {
        let handle = self.select(registry)?;
        let result = handle.query(sql)?;
        match self.cli.format {
            OutputFormat::Json => print_json_lines(&result)?,
            OutputFormat::Pretty => print_summary(&result),
        }
        Ok(())
    }
}

fn print_json_lines(result: &QueryResult) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = LineDelimitedWriter::new(stdout.lock());
    for batch in &result.batches {
        writer.write(batch)?;
    }
    writer.finish()?;
    Ok(())
}

fn print_summary(result: &QueryResult) {
    for field in result.schema.fields() {
        println!("{}: {}", field.name(), field.data_type());
    }
    println!("{} rows", result.total_rows);
}
