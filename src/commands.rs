//! CLI command definitions
//!
//! Defines the clap commands for the test runner CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Execute the scenarios in one file or in every test file of a directory
    Run {
        /// Directory containing test files
        #[arg(long, default_value = "./")]
        file_path: PathBuf,

        /// Run only this file from the directory
        #[arg(long)]
        file_name: Option<String>,

        /// Run only the scenario with this name ("all" runs every scenario)
        #[arg(long, default_value = "all")]
        scenario_name: String,

        /// Write a JSON report of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Run the scenarios of each file one at a time
        #[arg(long)]
        sequential: bool,

        /// Configuration file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a sample test file to start from
    Init {
        /// Directory to create the sample in
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing sample file
        #[arg(long)]
        force: bool,
    },
}
