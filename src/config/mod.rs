mod app_config;

pub use app_config::{AppConfig, ConfigSource, LogConfig, CONFIG_FILE_NAME};
