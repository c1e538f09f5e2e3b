mod types;

pub use types::*;

use anyhow::{Context, Result};
use pixelpolicy_flat::{clamp_depth, FlatCodec};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    parse_config(&content).with_context(|| format!("Invalid config file: {:?}", path))
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content).context("Failed to parse config")?;

    validate_config(&config)?;

    config.codec.max_depth = clamp_depth(config.codec.max_depth);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./pixelpolicy.toml",
        "~/.config/pixelpolicy/config.toml",
        "/etc/pixelpolicy/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

impl Config {
    /// Flat codec for the configured depth
    pub fn codec(&self) -> FlatCodec {
        FlatCodec::new(self.codec.max_depth)
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.codec.max_depth == 0 {
        anyhow::bail!("codec.max_depth must be at least 1");
    }

    if config.logging.level.parse::<tracing::Level>().is_err() {
        anyhow::bail!("Unknown logging level '{}'", config.logging.level);
    }

    if let Some(set) = &config.activation.policy_set {
        if set.trim().is_empty() {
            anyhow::bail!("activation.policy_set cannot be empty");
        }
    }

    Ok(())
}
