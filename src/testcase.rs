use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{Example, Problem};

/// A single typed test case, derived per request and never persisted.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TestCase {
    pub id: u32,
    pub input: Map<String, Value>,
    pub expected: Value,
}

/// Problem-specific knowledge about how test data is written down.
pub trait CaseFormat: Send + Sync {
    fn problem_id(&self) -> &'static str;

    /// Extracts typed input and expected value from a textual example.
    /// `None` means the example does not match the problem's pattern.
    fn parse_example(&self, input: &str, output: &str) -> Option<(Map<String, Value>, Value)>;

    /// Whether a structured test fits the parameter and return types.
    fn accepts(&self, input: &Map<String, Value>, expected: &Value) -> bool;
}

/// Turns worked examples and custom JSON into a normalized test list.
#[derive(Default)]
pub struct TestCaseBuilder {
    formats: HashMap<&'static str, Box<dyn CaseFormat>>,
}

impl TestCaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with every problem format shipped in this crate
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        for format in crate::problems::builtin_formats() {
            builder.register(format);
        }
        builder
    }

    pub fn register(&mut self, format: Box<dyn CaseFormat>) {
        self.formats.insert(format.problem_id(), format);
    }

    /// Builds one test case per matching example, numbered densely from 1.
    pub fn build_from_examples(&self, problem_id: &str, examples: &[Example]) -> Vec<TestCase> {
        let Some(format) = self.formats.get(problem_id) else {
            log::debug!("No example format registered for problem {problem_id}");
            return Vec::new();
        };

        let mut tests = Vec::with_capacity(examples.len());
        for (idx, example) in examples.iter().enumerate() {
            match format.parse_example(&example.input, &example.output) {
                Some((input, expected)) => tests.push(TestCase {
                    id: tests.len() as u32 + 1,
                    input,
                    expected,
                }),
                None => log::debug!("Example {} of {problem_id} did not match, skipped", idx + 1),
            }
        }
        tests
    }

    /// Parses user-supplied tests. Never fails: anything unusable is dropped.
    pub fn parse_custom_tests(&self, problem_id: &str, raw: Option<&str>) -> Vec<TestCase> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Vec::new();
        };

        let elements = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(elements)) => elements,
            Ok(_) => {
                log::debug!("Custom tests for {problem_id} are not a JSON array, ignored");
                return Vec::new();
            }
            Err(e) => {
                log::debug!("Custom tests for {problem_id} are not valid JSON, ignored: {e}");
                return Vec::new();
            }
        };

        let format = self.formats.get(problem_id);
        let mut tests = Vec::with_capacity(elements.len());
        for (idx, element) in elements.into_iter().enumerate() {
            let Value::Object(mut input) = element else {
                log::debug!("Custom test {} of {problem_id} is not an object, skipped", idx + 1);
                continue;
            };
            let Some(expected) = input.remove("expected") else {
                log::debug!("Custom test {} of {problem_id} has no expected value, skipped", idx + 1);
                continue;
            };
            if format.is_some_and(|f| !f.accepts(&input, &expected)) {
                log::debug!("Custom test {} of {problem_id} does not fit the signature, skipped", idx + 1);
                continue;
            }
            tests.push(TestCase {
                id: tests.len() as u32 + 1,
                input,
                expected,
            });
        }
        tests
    }

    /// Example tests followed by custom tests, renumbered from 1.
    pub fn build(&self, problem: &Problem, custom_tests: Option<&str>) -> Vec<TestCase> {
        let mut tests = self.build_from_examples(&problem.id, &problem.examples);
        tests.extend(self.parse_custom_tests(&problem.id, custom_tests));
        for (idx, test) in tests.iter_mut().enumerate() {
            test.id = idx as u32 + 1;
        }
        tests
    }
}
