//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::color::ColorFormat;
use crate::domain::config::{AppConfig, LinuxConfig};
use crate::domain::error::ConfigError;
use crate::domain::picker::{Offset, PollInterval};
use crate::infrastructure::{ClipboardTool, NotifierKind};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let config = set_value(store.load().await?, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    let value = get_value(&config, key);
    presenter.output(value.as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Return `config` with `key` set to the validated `value`
fn set_value(mut config: AppConfig, key: &str, value: &str) -> Result<AppConfig, ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "format" => config.format = Some(value.trim().to_lowercase()),
        "interval" => config.interval = Some(value.trim().to_string()),
        "offset" => config.offset = Some(value.trim().to_string()),
        "notify" => {
            config.notify = Some(
                parse_bool(value)
                    .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            )
        }
        "failure_linger" => config.failure_linger_ms = Some(parse_millis(value).map_err(invalid)?),
        "font" => {
            // An empty value clears the setting
            config.font = Some(value.trim().to_string()).filter(|s| !s.is_empty())
        }
        "linux.clipboard_tool" => {
            linux_section(&mut config).clipboard_tool = Some(value.trim().to_lowercase())
        }
        "linux.notifier" => {
            linux_section(&mut config).notifier = Some(value.trim().to_lowercase())
        }
        _ => unreachable!(), // Already validated
    }

    Ok(config)
}

fn linux_section(config: &mut AppConfig) -> &mut LinuxConfig {
    config.linux.get_or_insert_with(LinuxConfig::default)
}

fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let linux = config.linux.as_ref();
    match key {
        "format" => config.format.clone(),
        "interval" => config.interval.clone(),
        "offset" => config.offset.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "failure_linger" => config.failure_linger_ms.map(|ms| format!("{}ms", ms)),
        "font" => config.font.clone(),
        "linux.clipboard_tool" => linux.and_then(|l| l.clipboard_tool.clone()),
        "linux.notifier" => linux.and_then(|l| l.notifier.clone()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "format" => {
            value
                .parse::<ColorFormat>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "interval" => {
            value
                .parse::<PollInterval>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "offset" => {
            value.parse::<Offset>().map_err(|e| invalid(e.to_string()))?;
        }
        "notify" => {
            parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
        }
        "failure_linger" => {
            parse_millis(value).map_err(invalid)?;
        }
        "linux.clipboard_tool" => {
            value
                .parse::<ClipboardTool>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "linux.notifier" => {
            value
                .parse::<NotifierKind>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        _ => {} // font accepts any path
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Parse a millisecond count, with or without an `ms` suffix
fn parse_millis(value: &str) -> Result<u64, String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed).trim();
    digits
        .parse::<u64>()
        .map_err(|_| format!("Invalid duration '{}'. Expected milliseconds (e.g., 1500)", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn parse_millis_values() {
        assert_eq!(parse_millis("1500"), Ok(1500));
        assert_eq!(parse_millis("250ms"), Ok(250));
        assert!(parse_millis("1.5s").is_err());
        assert!(parse_millis("-1").is_err());
    }

    #[test]
    fn validate_format() {
        assert!(validate_config_value("format", "hex").is_ok());
        assert!(validate_config_value("format", "RGB").is_ok());
        assert!(validate_config_value("format", "hsl").is_err());
    }

    #[test]
    fn validate_interval_bounds() {
        assert!(validate_config_value("interval", "40ms").is_ok());
        assert!(validate_config_value("interval", "5").is_err());
        assert!(validate_config_value("interval", "2s").is_err());
    }

    #[test]
    fn validate_offset() {
        assert!(validate_config_value("offset", "16,16").is_ok());
        assert!(validate_config_value("offset", "-8,4").is_ok());
        assert!(validate_config_value("offset", "16").is_err());
    }

    #[test]
    fn validate_tools() {
        assert!(validate_config_value("linux.clipboard_tool", "xclip").is_ok());
        assert!(validate_config_value("linux.clipboard_tool", "pbcopy").is_err());
        assert!(validate_config_value("linux.notifier", "none").is_ok());
        assert!(validate_config_value("linux.notifier", "growl").is_err());
    }

    #[test]
    fn set_unknown_key_fails() {
        let err = set_value(AppConfig::empty(), "api_key", "x").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        assert!(err.to_string().contains("Valid keys"));
    }

    #[test]
    fn set_and_get_values() {
        let config = set_value(AppConfig::empty(), "format", "RGB").unwrap();
        let config = set_value(config, "failure_linger", "900ms").unwrap();
        let config = set_value(config, "linux.notifier", "notify-send").unwrap();

        assert_eq!(get_value(&config, "format"), Some("rgb".to_string()));
        assert_eq!(config.failure_linger_ms, Some(900));
        assert_eq!(get_value(&config, "failure_linger"), Some("900ms".to_string()));
        assert_eq!(
            get_value(&config, "linux.notifier"),
            Some("notify-send".to_string())
        );
        assert_eq!(get_value(&config, "linux.clipboard_tool"), None);
    }

    #[test]
    fn empty_font_clears_setting() {
        let config = set_value(AppConfig::empty(), "font", "/fonts/a.ttf").unwrap();
        assert_eq!(config.font, Some("/fonts/a.ttf".to_string()));
        let config = set_value(config, "font", "").unwrap();
        assert!(config.font.is_none());
    }

    #[tokio::test]
    async fn set_persists_through_store() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "interval".to_string(),
                value: "100ms".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.interval, Some("100ms".to_string()));
    }

    #[tokio::test]
    async fn invalid_set_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_config_command(
            ConfigAction::Set {
                key: "notify".to_string(),
                value: "maybe".to_string(),
            },
            &store,
            &presenter,
        )
        .await;

        assert!(result.is_err());
        assert!(!store.exists());
    }
}
