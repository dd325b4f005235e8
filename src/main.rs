//! Paddock CLI
//!
//! Command-line interface for the backend registry

use clap::Parser;
use paddock::cli::{Cli, Runner};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let runner = Runner::new(cli);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
