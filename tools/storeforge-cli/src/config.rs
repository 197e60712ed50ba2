//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storeforge_commerce::CartConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storeforge.toml", ".storeforge.toml", "storeforge.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Where the shopper profile lives.
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// Shopper profile location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Profile name; each profile has its own cart.
    #[serde(default = "default_profile_name")]
    pub name: String,

    /// Directory holding profile data (default: platform data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_profile_name() -> String {
    "default".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            data_dir: None,
        }
    }
}

/// Generate a default storeforge.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storeforge cart configuration

[cart]
storage_key = "cart"
currency = "USD"
max_quantity_per_item = 9999
notifications = true

[profile]
name = "default"
# data_dir = "/path/to/profiles"
"#
    .to_string()
}
