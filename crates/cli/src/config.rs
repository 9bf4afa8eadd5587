//! CLI configuration utilities

use anyhow::{Context, Result};
use pawhaven_core::ClientConfig;
use std::path::Path;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Load client configuration, from `path` when given
///
/// An explicit data directory moves the credentials file into it.
pub fn load(path: Option<&Path>, data_dir: Option<&Path>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("Failed to load configuration")?,
    };

    if let Some(dir) = data_dir {
        config.storage.credentials_file = dir.join(CREDENTIALS_FILE);
    }
    Ok(config)
}
