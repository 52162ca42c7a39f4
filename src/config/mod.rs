mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use chrono::Datelike;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/club-ranking/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("club-ranking"))
        .unwrap_or_else(|| PathBuf::from(".club-ranking"))
}

/// Get the default config file path (~/.config/club-ranking/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load settings from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path,
///   and a missing default file yields default settings.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    /// Data file: command-line override, then settings, then the platform default.
    pub fn resolve_data_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data_file.as_ref().map(PathBuf::from))
            .unwrap_or_else(crate::store::get_data_path)
    }

    /// Ranking year: command-line override, then settings, then today's date.
    pub fn resolve_current_year(&self, cli_override: Option<i32>) -> i32 {
        cli_override
            .or(self.current_year)
            .unwrap_or_else(|| chrono::Utc::now().year())
    }
}
