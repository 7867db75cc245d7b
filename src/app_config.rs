//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (prefixed with GAMEABYSS_)
//! 2. Config file (config.toml)
//! 3. Default values
//!
//! Secrets such as the SMTP password stay in environment variables, not in
//! the config file.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Global application configuration
pub static APP_CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| {
    RwLock::new(AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config file, using defaults: {}", e);
        AppConfig::default()
    }))
});

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Game Abyss".to_string(),
            description: "A community blog for game explorers".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Moderation workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Minimum comment length (trimmed characters)
    pub comment_min_length: usize,
    /// Maximum post title length
    pub title_max_length: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            comment_min_length: 5,
            title_max_length: 100,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub moderation: ModerationConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // e.g. GAMEABYSS_SITE_NAME, GAMEABYSS_MODERATION_COMMENT_MIN_LENGTH
            .add_source(
                Environment::with_prefix("GAMEABYSS")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Trigger lazy loading of the config file and log the result.
pub fn init() {
    let config = APP_CONFIG.read().unwrap();
    log::info!("Configuration loaded: site.name = {}", config.site.name);
}

/// Get the current application configuration
pub fn get_config() -> AppConfig {
    APP_CONFIG.read().map(|c| c.clone()).unwrap_or_default()
}

/// Get site configuration
pub fn site() -> SiteConfig {
    get_config().site
}

/// Get moderation configuration
pub fn moderation() -> ModerationConfig {
    get_config().moderation
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.site.name, "Game Abyss");
        assert_eq!(config.moderation.comment_min_length, 5);
        assert_eq!(config.moderation.title_max_length, 100);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[site]
name = "Test Abyss"
base_url = "https://test.example.com"

[moderation]
comment_min_length = 10
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.site.name, "Test Abyss");
        assert_eq!(config.site.base_url, "https://test.example.com");
        assert_eq!(config.moderation.comment_min_length, 10);
        // Defaults still apply for unspecified values
        assert_eq!(config.moderation.title_max_length, 100);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = AppConfig::load_from_path("/nonexistent/config.toml").unwrap();
        assert_eq!(config.site.name, "Game Abyss");
        assert_eq!(config.moderation.comment_min_length, 5);
    }
}
