//! Sample test file generation for `test-it init`

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::common::{Error, Result};
use crate::testing::{ScenarioHeader, TestFile, TestScenario};

pub const SAMPLE_FILE_NAME: &str = "sample-test.json";

/// Scenarios showing each supported field
fn sample() -> TestFile {
    TestFile {
        tests: vec![
            TestScenario {
                scenario: "health check".to_string(),
                kind: String::new(),
                method: "GET".to_string(),
                url: "http://localhost:8080/health".to_string(),
                body: None,
                header: ScenarioHeader::default(),
                ignore: false,
                expected_status_code: 200,
                expected_result: json!({ "status": "ok" }),
            },
            TestScenario {
                scenario: "create user".to_string(),
                kind: String::new(),
                method: "POST".to_string(),
                url: "http://localhost:8080/users".to_string(),
                body: Some(json!({ "name": "Ada", "email": "ada@example.com" })),
                header: ScenarioHeader {
                    authorization: Some("Bearer <token>".to_string()),
                },
                ignore: false,
                expected_status_code: 201,
                expected_result: json!({ "id": 1, "name": "Ada" }),
            },
            TestScenario {
                scenario: "graphql query".to_string(),
                kind: "graphql".to_string(),
                method: "POST".to_string(),
                url: "http://localhost:8080/graphql".to_string(),
                body: Some(json!("{ user(id: 1) { name } }")),
                header: ScenarioHeader::default(),
                ignore: true,
                expected_status_code: 200,
                expected_result: json!({ "data": { "user": { "name": "Ada" } } }),
            },
        ],
    }
}

/// Write the sample file into `dir`, refusing to clobber unless `force`
pub fn write_sample(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(SAMPLE_FILE_NAME);
    if path.exists() && !force {
        return Err(Error::SampleExists(path.display().to_string()));
    }

    std::fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(&sample())?;
    std::fs::write(&path, content + "\n")?;
    Ok(path)
}
