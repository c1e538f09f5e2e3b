use pixelpolicy_flat::MAX_DEPTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub activation: ActivationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Tagged-union nesting kept in the flat form (1..=7)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    MAX_DEPTH
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActivationConfig {
    /// Also push every change to the production network
    #[serde(default)]
    pub activate_on_production: bool,

    /// Policy set the managed policies belong to
    #[serde(default)]
    pub policy_set: Option<String>,
}
