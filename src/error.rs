use thiserror::Error;

/// Errors raised while judging a submission.
///
/// Caller-side mistakes (`InvalidRequestShape`, `ProblemNotFound`,
/// `UnsupportedProblem`, `MalformedTestCase`) are reported as-is.
/// `GatewayUnavailable` is absorbed by the orchestration layer, which falls
/// back to local simulation.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("no harness template for problem `{problem_id}` in language `{language}`")]
    UnsupportedProblem {
        problem_id: String,
        language: String,
    },

    #[error("language not supported by runner: {0}")]
    UnsupportedLanguage(String),

    #[error("execution gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("invalid request: {0}")]
    InvalidRequestShape(String),

    #[error("question not found: {0}")]
    ProblemNotFound(String),

    #[error("test case {id} does not fit problem `{problem_id}`: {reason}")]
    MalformedTestCase {
        problem_id: String,
        id: u32,
        reason: String,
    },
}

impl JudgeError {
    /// Whether the error stems from the caller's input rather than a dependency.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequestShape(_)
                | Self::ProblemNotFound(_)
                | Self::UnsupportedProblem { .. }
                | Self::MalformedTestCase { .. }
        )
    }

    pub fn is_gateway_unavailable(&self) -> bool {
        matches!(self, Self::GatewayUnavailable(_))
    }
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        Self::GatewayUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, JudgeError>;
