use rand::Rng;
use serde_json::Value;

use crate::catalog::Problem;
use crate::config::FallbackConfig;
use crate::decoder::Verdict;

const INCORRECT_OUTPUT: &str = "Incorrect output";

/// Pass/fail estimate used while the execution service is unreachable.
///
/// Nothing is executed. A source that still holds starter-code placeholders
/// fails every example; otherwise each example passes with `pass_rate`.
pub struct FallbackSimulator {
    pass_rate: f64,
    placeholders: Vec<String>,
    placeholder_lines: Vec<String>,
}

impl FallbackSimulator {
    pub fn new(config: &FallbackConfig) -> Self {
        Self {
            pass_rate: config.pass_rate.clamp(0.0, 1.0),
            placeholders: config.placeholders.clone(),
            placeholder_lines: config.placeholder_lines.clone(),
        }
    }

    /// Whether the starter code appears to have been replaced.
    pub fn has_solution(&self, source: &str) -> bool {
        let marker = self.placeholders.iter().any(|p| source.contains(p.as_str()));
        let statement = source
            .lines()
            .map(str::trim)
            .any(|line| self.placeholder_lines.iter().any(|p| p == line));
        !marker && !statement
    }

    /// One simulated verdict per worked example of `problem`.
    pub fn simulate(&self, source: &str, language: &str, problem: &Problem) -> Vec<Verdict> {
        self.simulate_with(source, language, problem, &mut rand::rng())
    }

    pub fn simulate_with<R: Rng + ?Sized>(
        &self,
        source: &str,
        language: &str,
        problem: &Problem,
        rng: &mut R,
    ) -> Vec<Verdict> {
        let has_solution = self.has_solution(source);
        log::warn!(
            "Simulating {} example(s) of {} for {language} (solution present: {has_solution})",
            problem.examples.len(),
            problem.id
        );

        problem
            .examples
            .iter()
            .enumerate()
            .map(|(idx, example)| {
                let passed = has_solution && rng.random::<f64>() < self.pass_rate;
                let expected = Value::String(example.output.clone());
                Verdict {
                    test_number: idx as i64 + 1,
                    input: Value::String(example.input.clone()),
                    actual_output: if passed {
                        expected.clone()
                    } else {
                        Value::String(INCORRECT_OUTPUT.to_string())
                    },
                    expected_output: expected,
                    passed,
                    execution_time_ms: Some(rng.random_range(50.0..150.0)),
                    stderr: None,
                }
            })
            .collect()
    }
}
