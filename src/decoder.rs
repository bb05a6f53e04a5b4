use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Test number carried by verdicts that cannot be tied to a test case.
pub const UNATTRIBUTED_TEST: i64 = -1;

/// Structured result of one test case, as returned to callers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub test_number: i64,
    pub input: Value,
    pub expected_output: Value,
    pub actual_output: Value,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl Verdict {
    /// Placeholder for a stdout line that is not a result record.
    pub fn unattributed(line: &str, stderr: &str) -> Self {
        Self {
            test_number: UNATTRIBUTED_TEST,
            input: Value::Null,
            expected_output: Value::Null,
            actual_output: Value::String(line.to_string()),
            passed: false,
            execution_time_ms: None,
            stderr: Some(stderr.to_string()),
        }
    }
}

/// One line printed by the generated driver
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResultRecord {
    test_number: i64,
    input: Value,
    expected: Value,
    actual: Value,
    passed: bool,
    #[serde(default)]
    time_ms: Option<f64>,
}

impl From<ResultRecord> for Verdict {
    fn from(record: ResultRecord) -> Self {
        Self {
            test_number: record.test_number,
            input: record.input,
            expected_output: record.expected,
            actual_output: record.actual,
            passed: record.passed,
            execution_time_ms: record.time_ms,
            stderr: None,
        }
    }
}

/// Decodes raw program output into verdicts, one per non-empty line.
///
/// Lines are handled independently: a line that is not a result record
/// becomes an [`UNATTRIBUTED_TEST`] verdict carrying the raw text and the
/// captured stderr, and decoding carries on with the next line.
pub fn decode(stdout: &str, stderr: &str) -> Vec<Verdict> {
    stdout
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match serde_json::from_str::<ResultRecord>(line.trim()) {
            Ok(record) => record.into(),
            Err(e) => {
                log::warn!("Unparsable result line ({e}): {line}");
                Verdict::unattributed(line, stderr)
            }
        })
        .collect()
}
