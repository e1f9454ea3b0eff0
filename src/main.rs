// Entrypoint for the `bakeit` binary.
// - Keeps `main` small: set up logging, parse arguments, hand off to `cli::run`.
// - Fatal errors (config, unreadable input) are printed to stderr and exit 1.

use std::process::ExitCode;

use bakeit::cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout only carries the paste URL.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bakeit=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
