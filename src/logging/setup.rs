use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;
use crate::config::LogConfig;

/// Install the global subscriber: stdout plus, when enabled, a timestamped file.
///
/// `RUST_LOG` overrides `config.default_filter`.
///
/// # Returns
/// * `Ok(Some(path))` with the log file path when file logging is on
/// * `Ok(None)` when logging to stdout only
/// * `Err(io::Error)` if the log directory or file cannot be created
pub fn setup_logging(config: &LogConfig) -> io::Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.default_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let (file_layer, log_path) = if config.log_to_file {
        fs::create_dir_all(&config.log_dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_path = config
            .log_dir
            .join(format!("nuscenes_sr_{}.log", timestamp));
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)?;

        let layer = fmt::layer()
            .event_format(BracketedFormatter)
            .with_writer(Mutex::new(file))
            .with_ansi(false);
        (Some(layer), Some(log_path))
    } else {
        (None, None)
    };

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }
    Ok(log_path)
}
