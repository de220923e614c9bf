//! test-it - a declarative HTTP test runner
//!
//! Runs the HTTP scenarios described in JSON files and reports which ones
//! returned the expected status and body.

use clap::Parser;
use test_it::cli;
use test_it::commands::Commands;
use test_it::common::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "test-it", about = "Declarative HTTP test runner")]
#[command(version, long_about = None)]
struct Cli {
    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.log_format);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
