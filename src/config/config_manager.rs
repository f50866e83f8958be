use std::fs;

use crate::errors::{CodervetError, CodervetResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    /// Loads `~/.codervet/config.toml` if present, otherwise the defaults.
    pub fn load() -> CodervetResult<Config> {
        let config_path = dirs::home_dir()
            .map(|d| d.join(".codervet/config.toml"))
            .unwrap_or_default();

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(&config_path)
                .map_err(|e| CodervetError::file_error(&config_path, "read", e))?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CodervetError::Configuration(e.message().to_string()))?;
            return Ok(config);
        }

        Ok(Config::default())
    }
}
