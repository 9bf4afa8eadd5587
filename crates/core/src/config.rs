//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `PAWHAVEN_*` environment variables (`PAWHAVEN_API__BASE_URL`, ...).

use crate::{CoreError, CoreResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Token endpoints
    #[serde(default)]
    pub auth: AuthConfig,

    /// Durable credential storage
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport request timeout in seconds (0 disables it)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Token endpoint paths, relative to `api.base_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

/// Where the credential pair is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("pawhaven-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_login_path() -> String {
    "/user/token/".to_string()
}

fn default_refresh_path() -> String {
    "/user/token/refresh/".to_string()
}

fn default_credentials_file() -> PathBuf {
    default_data_dir().join("credentials.json")
}

/// Default directory for persisted client state
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAWHAVEN_STATE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pawhaven")
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

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            refresh_path: default_refresh_path(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
        }
    }
}

impl ApiConfig {
    /// Transport timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl ClientConfig {
    /// Load configuration from the usual file locations and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a config source cannot be parsed or the result is invalid
    pub fn load() -> CoreResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        for path in ["pawhaven.toml", "config/pawhaven.toml"] {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path).required(false));
            }
        }

        let config: Self = builder
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the result is invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is absolute and the endpoint paths are rooted
    pub fn validate(&self) -> CoreResult<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            CoreError::invalid_config(format!("api.base_url '{}': {e}", self.api.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::invalid_config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        for (name, path) in [
            ("auth.login_path", &self.auth.login_path),
            ("auth.refresh_path", &self.auth.refresh_path),
        ] {
            if !path.starts_with('/') {
                return Err(CoreError::invalid_config(format!(
                    "{name} must start with '/', got '{path}'"
                )));
            }
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PAWHAVEN")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.auth.refresh_path, "/user/token/refresh/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.timeout(), None);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://pets.example.org\"\ntimeout_secs = 3\n\n[auth]\nrefresh_path = \"/auth/refresh/\""
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://pets.example.org");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.auth.refresh_path, "/auth/refresh/");
        assert_eq!(config.auth.login_path, "/user/token/");
    }

    #[test]
    fn rejects_relative_endpoint_paths() {
        let mut config = ClientConfig::default();
        config.auth.refresh_path = "token/refresh/".to_string();
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());
    }
}
