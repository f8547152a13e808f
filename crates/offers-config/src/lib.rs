use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for offers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog subsidiary (GB, FR, DE, ...)
    #[serde(default = "default_subsidiary")]
    pub subsidiary: String,

    /// Datacenter to filter availability on
    #[serde(default = "default_datacenter")]
    pub datacenter: String,

    /// Number of offers to return
    #[serde(default = "default_top")]
    pub top: usize,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subsidiary: default_subsidiary(),
            datacenter: default_datacenter(),
            top: default_top(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_subsidiary() -> String {
    "GB".to_string()
}

fn default_datacenter() -> String {
    "lon".to_string()
}

fn default_top() -> usize {
    5
}

fn default_base_url() -> String {
    "https://eu.api.ovh.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("offers/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load config from `path`, writing defaults there if it does not exist
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "offers", "offers") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.offers/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.subsidiary, "GB");
        assert_eq!(config.datacenter, "lon");
        assert_eq!(config.top, 5);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.api.user_agent.starts_with("offers/"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.subsidiary, config.subsidiary);
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
datacenter = "rbx"
subsidiary = "FR"

[api]
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.datacenter, "rbx");
        assert_eq!(config.subsidiary, "FR");
        assert_eq!(config.top, 5);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.base_url, "https://eu.api.ovh.com/v1");
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.top, 5);

        std::fs::write(&path, "top = 3\n").unwrap();
        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.top, 3);
        assert_eq!(loaded.datacenter, "lon");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
