mod piston;
mod runtimes;

pub use piston::PistonGateway;
pub use runtimes::RuntimeCache;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::harness::SourceFile;

/// A (language, version) pair the remote service can run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCapability {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Output of one stage (compile or run) reported by the remote service.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub signal: Option<String>,
}

impl StageOutput {
    pub fn failed(&self) -> bool {
        self.code.is_some_and(|code| code != 0) || self.signal.is_some()
    }
}

/// Raw result of executing a synthesized program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    pub compile: Option<StageOutput>,
}

impl ExecutionOutput {
    /// Compiler diagnostics when the compile stage did not succeed.
    pub fn compile_error(&self) -> Option<String> {
        let compile = self.compile.as_ref().filter(|c| c.failed())?;
        let message = if compile.stderr.trim().is_empty() {
            compile.stdout.trim()
        } else {
            compile.stderr.trim()
        };
        Some(message.to_string())
    }
}

/// Boundary to the remote sandboxed execution service.
///
/// Implementations perform no retries. Transport failures and non-success
/// responses are reported as `JudgeError::GatewayUnavailable`.
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    /// Looks up the runtime serving `language`, fetching the capability
    /// list on first use.
    async fn resolve_runtime(&self, language: &str) -> Result<RuntimeCapability>;

    /// Runs `files` once on `runtime` and returns the captured output.
    async fn execute(&self, runtime: &RuntimeCapability, files: &[SourceFile]) -> Result<ExecutionOutput>;
}
