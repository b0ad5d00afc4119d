//! HR Portal Configuration System
//!
//! TOML-based configuration with environment variable override support.

use std::collections::HashSet;
use std::path::Path;

use hr_access::{CurrentUser, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub session: SessionConfig,

    /// Mock user directory standing in for an identity provider
    pub users: Vec<UserConfig>,

    /// Enable development mode
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            session: SessionConfig::default(),
            users: demo_users(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

/// Session resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie carrying the signed-in user id
    pub cookie_name: String,
    /// Header carrying the signed-in user id (checked before the cookie)
    pub header_name: String,
    /// Mark the session cookie `Secure`
    pub secure: bool,
    /// User assumed when a request carries no session (dev mode only)
    pub default_user: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "hr_session".to_string(),
            header_name: "x-hr-user".to_string(),
            secure: false,
            default_user: None,
        }
    }
}

/// One entry in the mock user directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserConfig {
    pub fn new(id: &str, name: &str, email: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
        }
    }

    /// Resolve into the user handed to the access core
    pub fn to_current_user(&self) -> Result<CurrentUser, ConfigError> {
        let role: Role = self.role.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "user '{}' has unknown role '{}'",
                self.id, self.role
            ))
        })?;
        Ok(CurrentUser::new(&self.id, &self.name, &self.email, role))
    }
}

/// Built-in demo directory, one user per role
pub fn demo_users() -> Vec<UserConfig> {
    vec![
        UserConfig::new("admin", "Jordan Blake", "admin@hrportal.local", Role::Admin),
        UserConfig::new("manager", "Riley Chen", "manager@hrportal.local", Role::Manager),
        UserConfig::new("employee", "Sam Patel", "employee@hrportal.local", Role::Employee),
        UserConfig::new("hr", "Casey Morgan", "hr@hrportal.local", Role::HrManager),
    ]
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.session.header_name.is_empty()
            || !self
                .session
                .header_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::ValidationError(format!(
                "session.header_name '{}' is not a valid header name",
                self.session.header_name
            )));
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.id.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "user id must not be empty".to_string(),
                ));
            }
            if !seen.insert(user.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate user id '{}'",
                    user.id
                )));
            }
            user.to_current_user()?;
        }

        if let Some(default_user) = &self.session.default_user {
            if !seen.contains(default_user.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "session.default_user '{}' is not in the user directory",
                    default_user
                )));
            }
        }

        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# HR Portal Configuration
# Environment variables override these settings

dev_mode = false

[http]
port = 8080
host = "0.0.0.0"
cors_origins = ["http://localhost:5173"]

[session]
cookie_name = "hr_session"
header_name = "x-hr-user"
secure = false
# default_user = "employee"  # honoured in dev mode only

# Mock user directory. role is one of: admin, manager, employee, hr_manager
[[users]]
id = "admin"
name = "Jordan Blake"
email = "admin@hrportal.local"
role = "admin"

[[users]]
id = "manager"
name = "Riley Chen"
email = "manager@hrportal.local"
role = "manager"

[[users]]
id = "employee"
name = "Sam Patel"
email = "employee@hrportal.local"
role = "employee"

[[users]]
id = "hr"
name = "Casey Morgan"
email = "hr@hrportal.local"
role = "hr_manager"
"#
        .to_string()
    }
}
