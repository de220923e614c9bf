//! Scenario execution engine
//!
//! Reads scenario files, sends each scenario as an HTTP request through a
//! pluggable [`Transport`], and compares the observed status and JSON body
//! against the expectations. Assertions are made on parsed JSON values, so
//! key order and formatting of the response never matter.

pub mod evaluator;
pub mod request;
pub mod runner;
pub mod scenario;
pub mod suite;
pub mod transport;

pub use evaluator::{evaluate, json_eq, Evaluation, Failure, Verdict};
pub use request::{build, OutboundRequest, PreparedRequest};
pub use runner::{ExecutionResult, ScenarioRunner};
pub use scenario::{BodyMode, ScenarioHeader, TestFile, TestScenario};
pub use suite::{run_file, run_files, FileError, SuiteResult};
pub use transport::{HttpTransport, Transport, TransportResponse};
