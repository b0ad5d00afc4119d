//! Access Error Types

use thiserror::Error;

use crate::module::{Action, Module};
use crate::role::Role;

/// Failures at the string boundary of the access core.
///
/// These never escape the string-keyed decision functions; those map any
/// parse failure to a denial.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// A denied `require_*` check.
///
/// Denial is an expected outcome; callers turn it into a response at the
/// point of the check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Role {role} may not {action} {module}")]
pub struct AccessDenied {
    pub role: Role,
    pub module: Module,
    pub action: Action,
}
