//! Multi-file orchestration
//!
//! Every file runs in its own task. A file that cannot be read or parsed is
//! recorded as a [`FileError`] and does not affect the others.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::common::{Error, Result};

use super::runner::{ExecutionResult, ScenarioRunner};
use super::scenario::TestFile;

/// A file that could not be run
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

/// Results of every file in a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteResult {
    pub files: Vec<ExecutionResult>,
    pub errors: Vec<FileError>,
}

impl SuiteResult {
    pub fn passed(&self) -> usize {
        self.files.iter().map(ExecutionResult::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().map(ExecutionResult::failed).sum()
    }

    pub fn ignored(&self) -> usize {
        self.files.iter().map(|f| f.ignored).sum()
    }

    /// No failed scenario and no broken file
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.files.iter().all(ExecutionResult::is_success)
    }
}

/// Display name for a scenario file
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, parse and run a single scenario file
pub async fn run_file(runner: &ScenarioRunner, path: &Path) -> Result<ExecutionResult> {
    let label = file_label(path);
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::file_read(&path.display().to_string(), &e))?;
    let test_file = TestFile::parse(&label, &data)?;

    tracing::info!(file = %label, scenarios = test_file.tests.len(), "Executing test file");
    Ok(runner.run(&label, test_file.tests).await)
}

/// Run all files concurrently and wait for every one of them
///
/// Each task is paired with its file label, so a task that dies is still
/// reported against the right file.
pub async fn run_files(runner: Arc<ScenarioRunner>, paths: Vec<PathBuf>) -> SuiteResult {
    let (labels, handles): (Vec<_>, Vec<_>) = paths
        .into_iter()
        .map(|path| {
            let label = file_label(&path);
            let runner = Arc::clone(&runner);
            let handle = tokio::spawn(async move { run_file(&runner, &path).await });
            (label, handle)
        })
        .unzip();
    let joined = futures_util::future::join_all(handles).await;

    let mut suite = SuiteResult::default();
    for (file, joined) in labels.into_iter().zip(joined) {
        let message = match joined {
            Ok(Ok(result)) => {
                suite.files.push(result);
                continue;
            }
            Ok(Err(e)) => {
                tracing::error!(file = %file, error = %e, "Test file failed");
                e.to_string()
            }
            Err(e) => {
                tracing::error!(file = %file, error = %e, "Test file task failed");
                e.to_string()
            }
        };
        suite.errors.push(FileError { file, message });
    }

    suite.files.sort_by(|a, b| a.file.cmp(&b.file));
    suite.errors.sort_by(|a, b| a.file.cmp(&b.file));
    suite
}
