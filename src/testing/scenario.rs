//! Test scenario types
//!
//! Defines the data structures for deserializing scenario files.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::paths::is_yaml;
use crate::common::{Error, Result};

/// A complete scenario file
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TestFile {
    /// Scenarios in file order
    #[serde(alias = "scenarios")]
    pub tests: Vec<TestScenario>,
}

impl TestFile {
    /// Parse a scenario file from its raw bytes
    ///
    /// Files named `*.yaml` / `*.yml` are parsed as YAML, everything else as JSON.
    pub fn parse(name: &str, data: &[u8]) -> Result<Self> {
        if is_yaml(name) {
            serde_yaml::from_slice(data).map_err(|e| Error::scenario_parse(name, e))
        } else {
            serde_json::from_slice(data).map_err(|e| Error::scenario_parse(name, e))
        }
    }
}

/// One HTTP test case
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestScenario {
    /// Display name, used as the result key
    pub scenario: String,
    /// Body shaping mode: empty for raw JSON, "graphql" for a query payload
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// HTTP method, used verbatim
    pub method: String,
    /// Target URL, used verbatim
    pub url: String,
    /// Request body; `null` is the same as absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: ScenarioHeader,
    /// Skip this scenario
    #[serde(default)]
    pub ignore: bool,
    pub expected_status_code: u16,
    /// Expected response body, compared structurally
    ///
    /// Defaults to `null` when omitted. Response bodies are always compared
    /// as objects, so a scenario without an expectation never passes.
    #[serde(default)]
    pub expected_result: Value,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TestScenario {
    /// How the body should be shaped before sending
    pub fn body_mode(&self) -> BodyMode {
        BodyMode::from(self.kind.as_str())
    }

    /// The authorization header value, if one should be sent
    pub fn authorization(&self) -> Option<&str> {
        self.header
            .authorization
            .as_deref()
            .filter(|value| !value.is_empty())
    }
}

/// Per-scenario request headers
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

/// Request body shaping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Send the body as-is
    Raw,
    /// Wrap the body as `{"query": body}`
    GraphQl,
}

impl From<&str> for BodyMode {
    fn from(kind: &str) -> Self {
        if kind.trim().eq_ignore_ascii_case("graphql") {
            BodyMode::GraphQl
        } else {
            BodyMode::Raw
        }
    }
}
