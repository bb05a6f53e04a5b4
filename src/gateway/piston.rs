use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ExecutionGateway, ExecutionOutput, RuntimeCache, RuntimeCapability, StageOutput};
use crate::error::{JudgeError, Result};
use crate::harness::SourceFile;

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: &'a [SourceFile],
}

#[derive(Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    run: StageOutput,
    #[serde(default)]
    compile: Option<StageOutput>,
}

/// Gateway to a Piston-compatible execution API (`/runtimes`, `/execute`).
pub struct PistonGateway {
    http: reqwest::Client,
    base_url: String,
    cache: RuntimeCache,
}

impl PistonGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: RuntimeCache::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &RuntimeCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn fetch_runtimes(&self) -> Result<Vec<RuntimeCapability>> {
        let response = self.http.get(self.url("runtimes")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JudgeError::GatewayUnavailable(format!(
                "runtime list request returned {status}"
            )));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ExecutionGateway for PistonGateway {
    async fn resolve_runtime(&self, language: &str) -> Result<RuntimeCapability> {
        let runtimes = match self.cache.get() {
            Some(runtimes) => runtimes,
            None => {
                let fetched = self.fetch_runtimes().await?;
                log::info!("Cached {} runtime(s) from {}", fetched.len(), self.base_url);
                self.cache.store(fetched)
            }
        };

        RuntimeCache::select(&runtimes, language)
            .ok_or_else(|| JudgeError::UnsupportedLanguage(language.to_string()))
    }

    async fn execute(&self, runtime: &RuntimeCapability, files: &[SourceFile]) -> Result<ExecutionOutput> {
        let request = ExecuteRequest {
            language: &runtime.language,
            version: &runtime.version,
            files,
        };
        let response = self.http.post(self.url("execute")).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JudgeError::GatewayUnavailable(format!(
                "execute request returned {status}"
            )));
        }

        let ExecuteResponse { run, compile } = response.json().await?;
        log::debug!(
            "Executed {} file(s) on {} {}: run code {:?}",
            files.len(),
            runtime.language,
            runtime.version,
            run.code
        );

        Ok(ExecutionOutput {
            stdout: run.stdout,
            stderr: run.stderr,
            compile,
        })
    }
}
