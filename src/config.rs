use clap::Parser;
use serde::Deserialize;

use crate::catalog::Problem;

pub const DEFAULT_GATEWAY_URL: &str = "https://emkc.org/api/v2/piston";

#[derive(Parser)]
#[command(name = "judge", version = "1.0", about, long_about = None)]
pub struct CliArgs {
    /// Path to the configuration file
    #[arg(long = "config", short = 'c')]
    pub config_path: String,

    /// Fetch the runtime list from the execution service before serving
    #[arg(long = "warm-runtimes", short = 'w', default_value_t = false)]
    pub warm_runtimes: bool,
}

impl CliArgs {
    /// Load the configuration from the specified file
    pub fn to_config(&self) -> std::io::Result<Config> {
        let file = std::fs::File::open(&self.config_path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| e.into())
    }
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    pub problems: Vec<Problem>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
    pub bind_port: Option<u16>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
    /// The only language routed to the execution service
    #[serde(default = "default_primary_language")]
    pub primary_language: String,
    /// Upper bound on one execute call; unbounded when absent
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            primary_language: default_primary_language(),
            timeout_secs: None,
        }
    }
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_primary_language() -> String {
    "cpp".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct FallbackConfig {
    #[serde(default = "default_pass_rate")]
    pub pass_rate: f64,
    /// Starter-code markers matched anywhere in the source
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
    /// Starter-code statements matched against whole trimmed lines
    #[serde(default = "default_placeholder_lines")]
    pub placeholder_lines: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            pass_rate: default_pass_rate(),
            placeholders: default_placeholders(),
            placeholder_lines: default_placeholder_lines(),
        }
    }
}

fn default_pass_rate() -> f64 {
    0.7
}

fn default_placeholders() -> Vec<String> {
    vec![
        "// Write your solution here".to_string(),
        "# Write your solution here".to_string(),
    ]
}

fn default_placeholder_lines() -> Vec<String> {
    vec!["pass".to_string()]
}
