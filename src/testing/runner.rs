//! Scenario runner
//!
//! Executes the scenarios of one file through the request builder, the
//! injected transport and the evaluator, and aggregates the verdicts.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::evaluator::{self, Failure, Verdict};
use super::request;
use super::scenario::TestScenario;
use super::transport::Transport;

/// Aggregated result of running one scenario file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionResult {
    /// Name of the file the scenarios came from
    pub file: String,
    /// Scenario name -> passed
    pub outcomes: BTreeMap<String, bool>,
    /// Reason for every `false` outcome
    pub failures: BTreeMap<String, Failure>,
    /// Scenarios skipped because they were marked `ignore`
    pub ignored: usize,
    /// Scenarios skipped by the name filter
    pub filtered: usize,
    /// Names executed more than once; only the last result is kept
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<String>,
}

impl ExecutionResult {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.values().filter(|passed| **passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn record(&mut self, name: String, verdict: Verdict) {
        let previous = match verdict {
            Verdict::Pass => {
                self.failures.remove(&name);
                self.outcomes.insert(name.clone(), true)
            }
            Verdict::Fail(failure) => {
                self.failures.insert(name.clone(), failure);
                self.outcomes.insert(name.clone(), false)
            }
        };
        if previous.is_some() {
            tracing::warn!(
                file = %self.file,
                scenario = %name,
                "Duplicate scenario name, keeping the last result"
            );
            self.duplicates.push(name);
        }
    }
}

/// Runs scenarios against an injected transport
pub struct ScenarioRunner {
    transport: Arc<dyn Transport>,
    filter: Option<String>,
    parallel: bool,
}

impl ScenarioRunner {
    /// Create a runner; scenarios of a file run concurrently by default
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            filter: None,
            parallel: true,
        }
    }

    /// Only run the scenario with this name; `"all"` disables the filter
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|name| !name.is_empty() && name != "all");
        self
    }

    /// Run the scenarios of a file concurrently or one at a time
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every scenario of a file and collect the verdicts
    pub async fn run(&self, file: &str, scenarios: Vec<TestScenario>) -> ExecutionResult {
        let mut result = ExecutionResult::new(file);
        let mut selected = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            if self
                .filter
                .as_deref()
                .is_some_and(|name| name != scenario.scenario)
            {
                result.filtered += 1;
            } else if scenario.ignore {
                tracing::info!(file, scenario = %scenario.scenario, "Test ignored");
                result.ignored += 1;
            } else {
                selected.push(scenario);
            }
        }

        let verdicts = if self.parallel {
            self.run_parallel(file, selected).await
        } else {
            let mut verdicts = Vec::with_capacity(selected.len());
            for scenario in selected {
                let verdict = execute(self.transport.as_ref(), file, &scenario).await;
                verdicts.push((scenario.scenario, verdict));
            }
            verdicts
        };

        // Merge in file order so the last duplicate wins deterministically
        for (name, verdict) in verdicts {
            result.record(name, verdict);
        }

        result
    }

    /// One task per scenario; each task owns its verdict until the join
    async fn run_parallel(
        &self,
        file: &str,
        scenarios: Vec<TestScenario>,
    ) -> Vec<(String, Verdict)> {
        let handles: Vec<_> = scenarios
            .into_iter()
            .map(|scenario| {
                let name = scenario.scenario.clone();
                let transport = Arc::clone(&self.transport);
                let file = file.to_string();
                let handle = tokio::spawn(async move {
                    execute(transport.as_ref(), &file, &scenario).await
                });
                (name, handle)
            })
            .collect();

        let (names, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let joined = futures_util::future::join_all(handles).await;

        names
            .into_iter()
            .zip(joined)
            .map(|(name, joined)| {
                let verdict = joined.unwrap_or_else(|e| {
                    tracing::error!(file, scenario = %name, error = %e, "Scenario task failed");
                    Verdict::Fail(Failure::Aborted {
                        message: e.to_string(),
                    })
                });
                (name, verdict)
            })
            .collect()
    }
}

/// Build, send and evaluate a single scenario
///
/// Never fails: every problem along the way ends up in the verdict or in the log.
pub async fn execute(transport: &dyn Transport, file: &str, scenario: &TestScenario) -> Verdict {
    let name = scenario.scenario.as_str();
    let prepared = request::build(scenario);
    for diagnostic in &prepared.diagnostics {
        tracing::warn!(file, scenario = name, "{}", diagnostic);
    }

    let response = match transport.execute(&prepared.request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(file, scenario = name, error = %e, "Request failed");
            return Verdict::Fail(Failure::Transport {
                message: e.to_string(),
            });
        }
    };

    let evaluation = evaluator::evaluate(response.status, &response.body, scenario);
    for diagnostic in &evaluation.diagnostics {
        tracing::warn!(file, scenario = name, status = response.status, "{}", diagnostic);
    }

    match &evaluation.verdict {
        Verdict::Pass => tracing::info!(file, scenario = name, "Test passed"),
        Verdict::Fail(failure) => {
            tracing::info!(file, scenario = name, reason = %failure, "Test failed")
        }
    }

    evaluation.verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, Result};
    use crate::testing::request::OutboundRequest;
    use crate::testing::transport::TransportResponse;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies to every request with the same canned response
    struct Canned {
        status: u16,
        body: &'static str,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, _request: &OutboundRequest) -> Result<TransportResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransportResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, request: &OutboundRequest) -> Result<TransportResponse> {
            Err(Error::Transport(format!("connection refused: {}", request.url)))
        }
    }

    fn scenario(name: &str, expected: Value) -> TestScenario {
        TestScenario {
            scenario: name.to_string(),
            kind: String::new(),
            method: "GET".to_string(),
            url: "http://x/y".to_string(),
            body: None,
            header: Default::default(),
            ignore: false,
            expected_status_code: 200,
            expected_result: expected,
        }
    }

    #[tokio::test]
    async fn test_ignored_scenarios_never_reach_transport() {
        let transport = Canned::new(200, r#"{"status":"ok"}"#);
        let runner = ScenarioRunner::new(transport.clone());

        let mut skipped = scenario("skipped", json!({"status": "ok"}));
        skipped.ignore = true;
        let mut also_skipped = scenario("also-skipped", json!({}));
        also_skipped.ignore = true;

        let result = runner
            .run(
                "f.json",
                vec![skipped, scenario("ok", json!({"status": "ok"})), also_skipped],
            )
            .await;

        assert_eq!(result.ignored, 2);
        assert_eq!(result.outcomes.len(), 1);
        assert!(!result.outcomes.contains_key("skipped"));
        assert_eq!(result.outcomes.get("ok"), Some(&true));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_soft() {
        let runner = ScenarioRunner::new(Arc::new(Unreachable));
        let result = runner
            .run("f.json", vec![scenario("a", json!({})), scenario("b", json!({}))])
            .await;

        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.failed(), 2);
        assert!(matches!(
            result.failures.get("a"),
            Some(Failure::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_names_last_wins() {
        let transport = Canned::new(200, r#"{"v":2}"#);
        let runner = ScenarioRunner::new(transport).with_parallel(false);

        let result = runner
            .run(
                "dup.json",
                vec![scenario("same", json!({"v": 2})), scenario("same", json!({"v": 1}))],
            )
            .await;

        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.outcomes.get("same"), Some(&false));
        assert_eq!(result.duplicates, vec!["same".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_last_pass_clears_failure() {
        let transport = Canned::new(200, r#"{"v":2}"#);
        let runner = ScenarioRunner::new(transport);

        let result = runner
            .run(
                "dup.json",
                vec![scenario("same", json!({"v": 1})), scenario("same", json!({"v": 2}))],
            )
            .await;

        assert_eq!(result.outcomes.get("same"), Some(&true));
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn test_filter_selects_single_scenario() {
        let transport = Canned::new(200, "{}");
        let runner = ScenarioRunner::new(transport.clone()).with_filter(Some("two".to_string()));

        let result = runner
            .run(
                "f.json",
                vec![
                    scenario("one", json!({})),
                    scenario("two", json!({})),
                    scenario("three", json!({})),
                ],
            )
            .await;

        assert_eq!(result.filtered, 2);
        assert_eq!(result.ignored, 0);
        assert_eq!(result.outcomes.keys().collect::<Vec<_>>(), vec!["two"]);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_filter_all_runs_everything() {
        let runner =
            ScenarioRunner::new(Canned::new(200, "{}")).with_filter(Some("all".to_string()));
        let result = runner
            .run("f.json", vec![scenario("one", json!({})), scenario("two", json!({}))])
            .await;
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.filtered, 0);
    }

    #[tokio::test]
    async fn test_empty_file_yields_empty_result() {
        let runner = ScenarioRunner::new(Canned::new(200, "{}"));
        let result = runner.run("empty.json", Vec::new()).await;
        assert!(result.outcomes.is_empty());
        assert!(result.is_success());
        assert_eq!(result.file, "empty.json");
    }
}
