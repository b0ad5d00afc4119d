//! Portal roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AccessError;

/// Role assigned to a portal user at sign-in.
///
/// Roles are labels handed to the access core by the session layer; the core
/// never creates or changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    /// Present in the user model but holds no grants in the registry.
    HrManager,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Employee, Role::HrManager];

    /// Wire name (`admin`, `manager`, `employee`, `hr_manager`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::HrManager => "hr_manager",
        }
    }

    /// Human-readable name for page copy
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
            Role::HrManager => "HR Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}
