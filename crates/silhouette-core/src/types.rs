//! Core types for Silhouette

use serde::{Deserialize, Serialize};

/// Gateway configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bind: BindMode,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_port() -> u16 {
    7717
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: BindMode::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// Bind mode for the gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    #[default]
    Loopback,
    Lan,
}

impl BindMode {
    pub fn to_addr(&self) -> &str {
        match self {
            BindMode::Loopback => "127.0.0.1",
            BindMode::Lan => "0.0.0.0",
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    pub token: Option<String>,
}

/// Authentication mode
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Token,
    None,
}

/// Workflow engine configuration.
///
/// Replaceable wholesale at runtime; changes take effect on the next tick.
/// `max_runtime_hours == 0.0` disables the runtime limit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub enabled: bool,
    pub continuous: bool,
    pub max_daily_tokens: u64,
    pub max_runtime_hours: f64,
    pub model: String,
    pub max_tokens_per_call: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            continuous: true,
            max_daily_tokens: 250_000,
            max_runtime_hours: 0.0,
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens_per_call: 1024,
        }
    }
}
