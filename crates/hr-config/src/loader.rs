//! Configuration loader with file and environment variable support

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::{AppConfig, ConfigError};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "hr-portal.toml",
    "./config/config.toml",
    "/etc/hr-portal/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found), apply environment overrides, validate
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match self.find_config_file() {
            Some(path) => {
                info!(?path, "Loading configuration from file");
                AppConfig::from_file(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                AppConfig::default()
            }
        };

        apply_env_overrides(&mut config);

        if config.session.default_user.is_some() && !config.dev_mode {
            warn!("session.default_user ignored outside dev mode");
            config.session.default_user = None;
        }

        config.validate()?;
        Ok(config)
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(?path, "Configured path does not exist, searching defaults");
        }

        if let Ok(path) = env::var("HRPORTAL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    // HTTP
    if let Ok(val) = env::var("HRPORTAL_HTTP_PORT") {
        if let Ok(port) = val.parse() {
            config.http.port = port;
        }
    }
    if let Ok(val) = env::var("HRPORTAL_HTTP_HOST") {
        config.http.host = val;
    }
    if let Ok(val) = env::var("HRPORTAL_CORS_ORIGINS") {
        config.http.cors_origins = val.split(',').map(|s| s.trim().to_string()).collect();
    }

    // Session
    if let Ok(val) = env::var("HRPORTAL_SESSION_COOKIE") {
        config.session.cookie_name = val;
    }
    if let Ok(val) = env::var("HRPORTAL_SESSION_HEADER") {
        config.session.header_name = val.to_ascii_lowercase();
    }
    if let Ok(val) = env::var("HRPORTAL_SESSION_SECURE") {
        config.session.secure = val.parse().unwrap_or(false);
    }
    if let Ok(val) = env::var("HRPORTAL_DEFAULT_USER") {
        config.session.default_user = Some(val).filter(|v| !v.is_empty());
    }

    // General
    if let Ok(val) = env::var("HRPORTAL_DEV_MODE") {
        config.dev_mode = val == "true" || val == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
dev_mode = true

[session]
default_user = "manager"

[[users]]
id = "manager"
name = "Riley Chen"
email = "manager@hrportal.local"
role = "manager"
"#
        )
        .unwrap();

        let config = ConfigLoader::with_path(file.path()).load().unwrap();
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].role, "manager");
    }

    #[test]
    fn test_load_rejects_invalid_directory() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[users]]
id = "x"
name = "X"
email = "x@hrportal.local"
role = "superuser"
"#
        )
        .unwrap();

        let result = ConfigLoader::with_path(file.path()).load();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
