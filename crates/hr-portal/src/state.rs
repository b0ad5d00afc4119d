//! Shared portal state

use std::collections::BTreeMap;
use std::sync::Arc;

use hr_access::CurrentUser;
use hr_config::{AppConfig, ConfigError, SessionConfig, UserConfig};

/// Mock user directory standing in for the identity provider
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: BTreeMap<String, CurrentUser>,
}

impl UserDirectory {
    pub fn from_config(users: &[UserConfig]) -> Result<Self, ConfigError> {
        let mut directory = BTreeMap::new();
        for user in users {
            let current = user.to_current_user()?;
            if directory.insert(current.id.clone(), current).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate user id '{}'",
                    user.id
                )));
            }
        }
        Ok(Self { users: directory })
    }

    pub fn get(&self, id: &str) -> Option<&CurrentUser> {
        self.users.get(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Application state shared by every handler and layer.
///
/// Immutable after start.
#[derive(Clone)]
pub struct PortalState {
    pub directory: Arc<UserDirectory>,
    pub session: Arc<SessionConfig>,
    pub dev_mode: bool,
}

impl PortalState {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            directory: Arc::new(UserDirectory::from_config(&config.users)?),
            session: Arc::new(config.session.clone()),
            dev_mode: config.dev_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_access::Role;

    #[test]
    fn test_directory_from_demo_users() {
        let directory = UserDirectory::from_config(&hr_config::demo_users()).unwrap();
        assert_eq!(directory.len(), 4);
        assert_eq!(directory.get("hr").unwrap().role, Role::HrManager);
        assert!(directory.get("nobody").is_none());
    }

    #[test]
    fn test_directory_rejects_bad_role() {
        let users = vec![UserConfig {
            id: "x".to_string(),
            name: "X".to_string(),
            email: "x@hrportal.local".to_string(),
            role: "owner".to_string(),
        }];
        assert!(UserDirectory::from_config(&users).is_err());
    }
}
