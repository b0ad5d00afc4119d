//! Functional modules and the actions performed within them
//!
//! A module is the unit of permission granularity. Each module owns exactly
//! one literal route, which is how route allow-lists are derived from
//! permission grants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AccessError;

/// Functional area of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Organization,
    Employees,
    Recruitment,
    Attendance,
    Payroll,
    Performance,
    Learning,
    Reports,
    Helpdesk,
    Settings,
    Notifications,
    Calendar,
    Documents,
    UserActivity,
}

impl Module {
    /// Every module, in sidebar order
    pub const ALL: [Module; 15] = [
        Module::Dashboard,
        Module::Organization,
        Module::Employees,
        Module::Recruitment,
        Module::Attendance,
        Module::Payroll,
        Module::Performance,
        Module::Learning,
        Module::Reports,
        Module::Helpdesk,
        Module::Settings,
        Module::Notifications,
        Module::Calendar,
        Module::Documents,
        Module::UserActivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Organization => "organization",
            Module::Employees => "employees",
            Module::Recruitment => "recruitment",
            Module::Attendance => "attendance",
            Module::Payroll => "payroll",
            Module::Performance => "performance",
            Module::Learning => "learning",
            Module::Reports => "reports",
            Module::Helpdesk => "helpdesk",
            Module::Settings => "settings",
            Module::Notifications => "notifications",
            Module::Calendar => "calendar",
            Module::Documents => "documents",
            Module::UserActivity => "user_activity",
        }
    }

    /// The literal router path this module is served under
    pub fn route(&self) -> &'static str {
        match self {
            Module::Dashboard => "/",
            Module::Organization => "/organization",
            Module::Employees => "/employees",
            Module::Recruitment => "/recruitment",
            Module::Attendance => "/attendance",
            Module::Payroll => "/payroll",
            Module::Performance => "/performance",
            Module::Learning => "/learning",
            Module::Reports => "/reports",
            Module::Helpdesk => "/helpdesk",
            Module::Settings => "/settings",
            Module::Notifications => "/notifications",
            Module::Calendar => "/calendar",
            Module::Documents => "/documents",
            Module::UserActivity => "/user-activity",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            Module::Dashboard => "Dashboard",
            Module::Organization => "Organization",
            Module::Employees => "Employees",
            Module::Recruitment => "Recruitment",
            Module::Attendance => "Attendance & Leave",
            Module::Payroll => "Payroll",
            Module::Performance => "Performance",
            Module::Learning => "Learning",
            Module::Reports => "Reports",
            Module::Helpdesk => "Helpdesk",
            Module::Settings => "Settings",
            Module::Notifications => "Notifications",
            Module::Calendar => "Calendar",
            Module::Documents => "Documents",
            Module::UserActivity => "User Activity",
        }
    }

    /// Exact reverse of [`Module::route`]. Sub-paths do not resolve.
    pub fn from_route(route: &str) -> Option<Module> {
        Module::ALL.into_iter().find(|m| m.route() == route)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AccessError::UnknownModule(s.to_string()))
    }
}

/// Operation within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Approve,
    Process,
    Manage,
    Export,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Approve,
        Action::Process,
        Action::Manage,
        Action::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Process => "process",
            Action::Manage => "manage",
            Action::Export => "export",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AccessError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routes_are_unique() {
        let routes: HashSet<&str> = Module::ALL.iter().map(|m| m.route()).collect();
        assert_eq!(routes.len(), Module::ALL.len());
    }

    #[test]
    fn test_route_round_trip() {
        for module in Module::ALL {
            assert_eq!(Module::from_route(module.route()), Some(module));
        }
    }

    #[test]
    fn test_from_route_is_exact() {
        assert_eq!(Module::from_route("/attendance/123"), None);
        assert_eq!(Module::from_route("/Payroll"), None);
        assert_eq!(Module::from_route("/payroll/"), None);
        assert_eq!(Module::from_route(""), None);
    }

    #[test]
    fn test_user_activity_naming() {
        assert_eq!(Module::UserActivity.as_str(), "user_activity");
        assert_eq!(Module::UserActivity.route(), "/user-activity");
        assert_eq!("user_activity".parse::<Module>().unwrap(), Module::UserActivity);
        assert!("user-activity".parse::<Module>().is_err());
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("process".parse::<Action>().unwrap(), Action::Process);
        assert!("Process".parse::<Action>().is_err());
        assert!("approve ".parse::<Action>().is_err());
    }
}
