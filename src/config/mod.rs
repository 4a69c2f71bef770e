mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config.storage);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mercato.toml",
        "~/.config/mercato/config.toml",
        "/etc/mercato/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Expand a leading `~` in the storage paths.
fn expand_paths(storage: &mut StorageConfig) {
    storage.db_path = expand(&storage.db_path);
    storage.images_dir = expand(&storage.images_dir);
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.storage.db_path.as_os_str().is_empty() {
        anyhow::bail!("storage.db_path cannot be empty");
    }

    if config.storage.images_dir.as_os_str().is_empty() {
        anyhow::bail!("storage.images_dir cannot be empty");
    }

    if config.storage.pool_size == 0 {
        anyhow::bail!("storage.pool_size must be at least 1");
    }

    if config.uploads.max_upload_bytes == 0 {
        anyhow::bail!("uploads.max_upload_bytes must be at least 1");
    }

    Ok(())
}
