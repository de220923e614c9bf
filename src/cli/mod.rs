//! CLI command handling
//!
//! Resolves which files to run, wires the transport into the runner and
//! hands the results to the reporter.

mod init;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::commands::Commands;
use crate::common::{config::Config, paths, Error, Result};
use crate::testing::{run_files, HttpTransport, ScenarioRunner};

pub use init::{write_sample, SAMPLE_FILE_NAME};
pub use report::{print_suite, write_report};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            file_path,
            file_name,
            scenario_name,
            report,
            sequential,
            config,
        } => {
            let config = match config {
                Some(path) => Config::load_from(&path)?,
                None => Config::load()?,
            };

            let files = resolve_files(&file_path, file_name.as_deref())?;
            tracing::debug!(count = files.len(), "Resolved test files");

            // One client for the whole run, shared by every file and scenario
            let transport = Arc::new(HttpTransport::new(&config.http)?);
            let runner = ScenarioRunner::new(transport)
                .with_filter(Some(scenario_name))
                .with_parallel(config.runner.parallel_scenarios && !sequential);

            let suite = run_files(Arc::new(runner), files).await;
            print_suite(&suite);

            if let Some(path) = report {
                write_report(&suite, &path)?;
                println!("Report written to {}", path.display());
            }

            if suite.is_success() {
                Ok(())
            } else {
                Err(Error::TestsFailed {
                    failed: suite.failed(),
                    broken: suite.errors.len(),
                })
            }
        }

        Commands::Init { dir, force } => {
            let path = write_sample(&dir, force)?;
            println!("Created {}", path.display());
            println!("Edit the scenarios, then run 'test-it run --file-path {}'", dir.display());
            Ok(())
        }
    }
}

/// Pick the files to run: one named file, or every test file in the directory
pub fn resolve_files(dir: &Path, file_name: Option<&str>) -> Result<Vec<PathBuf>> {
    if let Some(name) = file_name.filter(|name| !name.is_empty()) {
        return Ok(vec![dir.join(name)]);
    }

    let files = paths::discover_test_files(dir).map_err(|e| Error::FileRead {
        path: dir.display().to_string(),
        error: e.to_string(),
    })?;
    if files.is_empty() {
        return Err(Error::NoTestFiles(dir.display().to_string()));
    }
    Ok(files)
}
