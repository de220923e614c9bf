//! Response evaluation
//!
//! Decides pass/fail from the observed status and body. Status is checked
//! first; the body only matters when the status matches.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::common::StepError;

use super::scenario::TestScenario;

/// Why a scenario failed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    StatusMismatch { expected: u16, actual: u16 },
    BodyMismatch { expected: Value, actual: Value },
    /// The request never produced a response
    Transport { message: String },
    /// The task executing the scenario died
    Aborted { message: String },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::StatusMismatch { expected, actual } => {
                write!(f, "expected status {}, got {}", expected, actual)
            }
            Failure::BodyMismatch { expected, actual } => {
                write!(f, "response body mismatch: expected {}, got {}", expected, actual)
            }
            Failure::Transport { message } => write!(f, "transport error: {}", message),
            Failure::Aborted { message } => write!(f, "execution aborted: {}", message),
        }
    }
}

/// Pass/fail verdict for one scenario
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Verdict plus non-fatal problems seen while evaluating
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub diagnostics: Vec<StepError>,
}

/// Evaluate an observed response against a scenario's expectations
pub fn evaluate(status: u16, raw_body: &[u8], scenario: &TestScenario) -> Evaluation {
    let mut diagnostics = Vec::new();

    let parsed = match serde_json::from_slice::<Map<String, Value>>(raw_body) {
        Ok(map) => map,
        Err(e) => {
            diagnostics.push(StepError::ResponseParse(e.to_string()));
            Map::new()
        }
    };
    let actual = Value::Object(parsed);

    let verdict = if status != scenario.expected_status_code {
        Verdict::Fail(Failure::StatusMismatch {
            expected: scenario.expected_status_code,
            actual: status,
        })
    } else if !json_eq(&actual, &scenario.expected_result) {
        Verdict::Fail(Failure::BodyMismatch {
            expected: scenario.expected_result.clone(),
            actual,
        })
    } else {
        Verdict::Pass
    };

    Evaluation {
        verdict,
        diagnostics,
    }
}

/// Structural equality over JSON values
///
/// Object key order is irrelevant, array order is significant, and numbers
/// compare by value (`1 == 1.0`). Values of different JSON kinds never match.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => false,
    }
}

fn number_eq(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
