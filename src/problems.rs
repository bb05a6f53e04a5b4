//! Built-in problems. Each one pairs the textual example format with the
//! C++ driver that calls the candidate's entry point.

pub mod palindrome;
pub mod pair_sum;
pub mod reverse_string;

use serde_json::{Map, Value};

use crate::error::JudgeError;
use crate::harness::HarnessTemplate;
use crate::testcase::{CaseFormat, TestCase};

pub use palindrome::Palindrome;
pub use pair_sum::PairSum;
pub use reverse_string::ReverseString;

pub fn builtin_formats() -> Vec<Box<dyn CaseFormat>> {
    vec![Box::new(PairSum), Box::new(ReverseString), Box::new(Palindrome)]
}

pub fn builtin_templates() -> Vec<Box<dyn HarnessTemplate>> {
    vec![Box::new(PairSum), Box::new(ReverseString), Box::new(Palindrome)]
}

/// A value that fits a C++ `int`.
fn as_int(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

fn as_int_array(value: &Value) -> Option<Vec<i32>> {
    value.as_array()?.iter().map(as_int).collect()
}

/// Either an array of one-character strings or a plain string, ASCII only.
fn as_char_array(value: &Value) -> Option<Vec<u8>> {
    let chars: Vec<char> = match value {
        Value::String(s) => s.chars().collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                let s = item.as_str()?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect::<Option<_>>()?,
        _ => return None,
    };
    chars
        .into_iter()
        .map(|c| c.is_ascii().then_some(c as u8))
        .collect()
}

/// Comma separated integers; an empty list is allowed.
fn parse_int_list(text: &str) -> Option<Vec<i32>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(',').map(|x| x.trim().parse().ok()).collect()
}

/// Body of a character list literal such as `"h","e"`.
fn parse_char_list(text: &str) -> Vec<String> {
    if let Ok(items) = serde_json::from_str::<Vec<String>>(&format!("[{text}]")) {
        return items;
    }
    text.split(',')
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| {
            x.trim_start_matches(['"', '\''])
                .trim_end_matches(['"', '\''])
                .to_string()
        })
        .collect()
}

fn input_object(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn malformed(problem_id: &str, test: &TestCase, reason: &str) -> JudgeError {
    JudgeError::MalformedTestCase {
        problem_id: problem_id.to_string(),
        id: test.id,
        reason: reason.to_string(),
    }
}
