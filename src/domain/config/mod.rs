//! Configuration value objects

mod app_config;

pub use app_config::{AppConfig, LinuxConfig, DEFAULT_FAILURE_LINGER_MS};
