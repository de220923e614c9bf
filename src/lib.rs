//! test-it - a declarative HTTP test runner
//!
//! Scenarios are described in JSON (or YAML) files. Each scenario is sent
//! as an HTTP request and its response status and JSON body are compared
//! against the expected values.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{ExecutionResult, ScenarioRunner, TestScenario, Transport};
