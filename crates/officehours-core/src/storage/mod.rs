mod config;
pub mod queue_store;

pub use config::{Config, CuesConfig, DisplayConfig, MeetingConfig};
pub use queue_store::{QueueStore, StoredQueue};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/officehours[-dev]/` based on OFFICEHOURS_ENV.
///
/// Set OFFICEHOURS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OFFICEHOURS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("officehours-dev")
    } else {
        base_dir.join("officehours")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
