//! On-disk state: the TOML configuration file.

mod config;

pub use config::{Config, ExportConfig, LoggingConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory, creating it if needed.
///
/// `TIMECRAFT_CONFIG_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/timecraft`, or `~/.config/timecraft-dev` when
/// `TIMECRAFT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TIMECRAFT_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMECRAFT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timecraft-dev")
            } else {
                base_dir.join("timecraft")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::NoConfigDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
