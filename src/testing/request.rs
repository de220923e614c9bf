//! Request construction
//!
//! Turns a scenario into an [`OutboundRequest`]. Problems are collected as
//! diagnostics rather than returned as errors: a request is always produced,
//! and a malformed one fails later at the transport.

use serde_json::{json, Value};

use crate::common::StepError;

use super::scenario::{BodyMode, TestScenario};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "authorization";
pub const APPLICATION_JSON: &str = "application/json";

/// A fully built HTTP request, independent of any client library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Request plus whatever went wrong while building it
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub request: OutboundRequest,
    pub diagnostics: Vec<StepError>,
}

/// Build the outbound request for a scenario
pub fn build(scenario: &TestScenario) -> PreparedRequest {
    let mut diagnostics = Vec::new();

    let body = scenario.body.as_ref().and_then(|body| {
        match serialize_body(scenario.body_mode(), body) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                diagnostics.push(e);
                None
            }
        }
    });

    if let Err(e) = reqwest::Method::from_bytes(scenario.method.as_bytes()) {
        diagnostics.push(StepError::InvalidRequest(format!(
            "invalid method '{}': {}",
            scenario.method, e
        )));
    }
    if let Err(e) = reqwest::Url::parse(&scenario.url) {
        diagnostics.push(StepError::InvalidRequest(format!(
            "invalid url '{}': {}",
            scenario.url, e
        )));
    }

    let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
    if let Some(token) = scenario.authorization() {
        headers.push((AUTHORIZATION.to_string(), token.to_string()));
    }

    PreparedRequest {
        request: OutboundRequest {
            method: scenario.method.clone(),
            url: scenario.url.clone(),
            headers,
            body,
        },
        diagnostics,
    }
}

/// Serialize a body according to the scenario's mode
pub fn serialize_body(mode: BodyMode, body: &Value) -> Result<Vec<u8>, StepError> {
    let result = match mode {
        BodyMode::GraphQl => serde_json::to_vec(&json!({ "query": body })),
        BodyMode::Raw => serde_json::to_vec(body),
    };
    result.map_err(|e| StepError::Serialize(e.to_string()))
}
