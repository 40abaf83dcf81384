//! Comet Mastery configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where use cases are loaded from
    pub catalog: CatalogConfig,

    /// Terminal output settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: ./cometmastery.yml
        let local_config = PathBuf::from("cometmastery.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/cometmastery/cometmastery.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cometmastery").join("cometmastery.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog files or directories, loaded in order; `builtin` is the
    /// embedded catalog
    pub paths: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "builtin".to_string(),
                "~/.config/cometmastery/catalog".to_string(),
                ".cometmastery/catalog".to_string(),
            ],
        }
    }
}

impl CatalogConfig {
    /// Only the embedded catalog
    pub fn builtin_only() -> Self {
        Self {
            paths: vec!["builtin".to_string()],
        }
    }

    pub fn use_builtin(&self) -> bool {
        self.paths.iter().any(|p| p == "builtin")
    }

    /// Expand paths (resolve ~/ and drop `builtin`)
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .filter_map(|p| {
                if p == "builtin" {
                    None
                } else if let Some(rest) = p.strip_prefix("~/") {
                    dirs::home_dir().map(|home| home.join(rest))
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .collect()
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colorize text output
    pub color: bool,

    /// Print the "next steps" hint after a rendered prompt
    #[serde(rename = "next-steps")]
    pub next_steps: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            next_steps: true,
        }
    }
}
