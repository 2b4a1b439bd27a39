//! Configuration file loading (docs.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use demodoc_static::GenerateConfig;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub generate: GenerateSettings,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_components")]
    pub components: String,
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateSettings {
    /// Component directories skipped when no components are named
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
        }
    }
}

fn default_components() -> String {
    "components".to_string()
}
fn default_output() -> String {
    "site".to_string()
}
fn default_ignore() -> Vec<String> {
    GenerateConfig::default().ignore
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    pub fn into_generate_config(self) -> GenerateConfig {
        GenerateConfig {
            components_dir: PathBuf::from(self.paths.components),
            output_dir: PathBuf::from(self.paths.output),
            ignore: self.generate.ignore,
        }
    }
}
