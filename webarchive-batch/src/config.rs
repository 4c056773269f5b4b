use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use pocket_client::Pocket;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Pocket credentials, read from a TOML file such as:
///
/// ```toml
/// "pocket.consumer.key" = "1234-abcd1234abcd1234abcd1234"
/// "pocket.access.token" = "5678defg-5678-defg-5678-defg56"
/// ```
///
/// Older config files spell the first key `pockat.consumer.key`; both are accepted.
#[derive(Clone, Deserialize, PartialEq)]
pub struct PocketConfig {
    #[serde(rename = "pocket.consumer.key", alias = "pockat.consumer.key")]
    pub consumer_key: String,
    #[serde(rename = "pocket.access.token")]
    pub access_token: String,
}

impl fmt::Debug for PocketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PocketConfig")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl PocketConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded Pocket credentials from {}", path.display());
        Ok(config)
    }

    pub fn client(&self) -> Result<Pocket> {
        Pocket::new(&self.consumer_key, &self.access_token).context("Failed to create Pocket client")
    }
}
