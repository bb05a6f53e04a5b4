pub mod cpp;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{JudgeError, Result};
use crate::testcase::TestCase;

/// A file handed to the execution service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// Composite-type renderers a harness may need in its preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    IntVec,
    CharVec,
}

/// Per-problem, per-language driver generator.
///
/// Implementations know the entry point of the candidate's solution and
/// bake every test case into the generated `main` as source literals.
pub trait HarnessTemplate: Send + Sync {
    fn problem_id(&self) -> &'static str;

    fn language(&self) -> &'static str;

    /// Method of `Solution` the driver calls.
    fn entry_point(&self) -> &'static str;

    /// Renderers the driver calls, emitted once each in the preamble.
    fn helpers(&self) -> &'static [Helper];

    /// Body of `main`: literal declarations followed by the test loop.
    fn render_main(&self, tests: &[TestCase]) -> Result<String>;
}

/// Registry of harness templates keyed by problem id, then language.
#[derive(Default)]
pub struct HarnessSynthesizer {
    templates: HashMap<&'static str, HashMap<&'static str, Box<dyn HarnessTemplate>>>,
}

impl HarnessSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin() -> Self {
        let mut synthesizer = Self::new();
        for template in crate::problems::builtin_templates() {
            synthesizer.register(template);
        }
        synthesizer
    }

    pub fn register(&mut self, template: Box<dyn HarnessTemplate>) {
        self.templates
            .entry(template.problem_id())
            .or_default()
            .insert(template.language(), template);
    }

    fn template(&self, problem_id: &str, language: &str) -> Option<&dyn HarnessTemplate> {
        self.templates
            .get(problem_id)
            .and_then(|by_language| by_language.get(language))
            .map(|template| template.as_ref())
    }

    /// Entry point the registered driver calls, if any.
    pub fn entry_point(&self, problem_id: &str, language: &str) -> Option<&'static str> {
        self.template(problem_id, language).map(|t| t.entry_point())
    }

    /// Emits the complete program: preamble, candidate source verbatim, driver.
    pub fn synthesize(
        &self,
        problem_id: &str,
        language: &str,
        candidate_source: &str,
        tests: &[TestCase],
    ) -> Result<SourceFile> {
        let template = self.template(problem_id, language).ok_or_else(|| {
            JudgeError::UnsupportedProblem {
                problem_id: problem_id.to_string(),
                language: language.to_string(),
            }
        })?;

        let body = template.render_main(tests)?;
        let content = match template.language() {
            cpp::LANGUAGE => format!(
                "{}\n{}\n{}",
                cpp::preamble(template.helpers()),
                candidate_source,
                cpp::main_function(&body)
            ),
            other => {
                return Err(JudgeError::UnsupportedProblem {
                    problem_id: problem_id.to_string(),
                    language: other.to_string(),
                });
            }
        };

        log::debug!(
            "Synthesized {problem_id} harness with {} test(s), {} bytes",
            tests.len(),
            content.len()
        );

        Ok(SourceFile {
            name: cpp::FILE_NAME.to_string(),
            content,
        })
    }
}
