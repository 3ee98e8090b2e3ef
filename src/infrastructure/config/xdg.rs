//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Directory name under the user config dir
const CONFIG_DIR_NAME: &str = "colorgrab";

/// XDG-compliant config store
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Create a new XDG config store with default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(CONFIG_DIR_NAME);

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse TOML content into AppConfig
    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize AppConfig to TOML
    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::LinuxConfig;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, XdgConfigStore) {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));
        (dir, store)
    }

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("colorgrab"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn parse_toml_with_linux_section() {
        let content = r#"
format = "rgb"
interval = "25ms"
offset = "8,-8"
notify = true
failure_linger = 900

[linux]
clipboard_tool = "xclip"
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.format, Some("rgb".to_string()));
        assert_eq!(config.interval, Some("25ms".to_string()));
        assert_eq!(config.offset, Some("8,-8".to_string()));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.failure_linger_ms, Some(900));
        assert_eq!(config.clipboard_tool_or_default(), "xclip");
        assert_eq!(config.notifier_or_default(), "notify-rust");
    }

    #[test]
    fn failure_linger_uses_documented_key() {
        let config = XdgConfigStore::parse_toml("failure_linger = 750\n").unwrap();
        assert_eq!(config.failure_linger_ms, Some(750));

        let written = XdgConfigStore::to_toml(&config).unwrap();
        assert!(written.contains("failure_linger = 750"));
        assert!(!written.contains("failure_linger_ms"));
    }

    #[test]
    fn parse_toml_rejects_garbage() {
        let err = XdgConfigStore::parse_toml("format = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(!store.exists());
        let config = store.load().await.unwrap();
        assert!(config.format.is_none());
        assert!(config.linux.is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_and_loads_back() {
        let (_dir, store) = temp_store();
        let config = AppConfig {
            format: Some("rgb".to_string()),
            font: Some("/fonts/mono.ttf".to_string()),
            linux: Some(LinuxConfig {
                notifier: Some("none".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        store.save(&config).await.unwrap();
        assert!(store.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.format, Some("rgb".to_string()));
        assert_eq!(loaded.font, Some("/fonts/mono.ttf".to_string()));
        assert_eq!(loaded.notifier_or_default(), "none");
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let (_dir, store) = temp_store();

        store.init().await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.format, Some("hex".to_string()));
        assert_eq!(loaded.interval, Some("40ms".to_string()));

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
