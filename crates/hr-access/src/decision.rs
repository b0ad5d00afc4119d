//! Access Decisions
//!
//! Fail-closed checks against the registry: anything not explicitly granted
//! is denied. Every function here is total and side-effect free apart from
//! debug logging.

use tracing::debug;

use crate::error::AccessDenied;
use crate::module::{Action, Module};
use crate::registry::entry_for;
use crate::role::Role;
use crate::user::CurrentUser;

/// May `role` perform `action` within `module`?
pub fn has_permission(role: Role, module: Module, action: Action) -> bool {
    let allowed = entry_for(role, module).is_some_and(|entry| entry.allows(action));
    debug!(%role, %module, %action, allowed, "Permission check");
    allowed
}

/// May `role` view `route`? Exact string match only.
///
/// Agrees with [`get_accessible_routes`](crate::registry::get_accessible_routes)
/// without building the set.
pub fn can_access_route(role: Role, route: &str) -> bool {
    let allowed = Module::from_route(route)
        .and_then(|module| entry_for(role, module))
        .is_some_and(|entry| entry.allows(Action::View));
    debug!(%role, route, allowed, "Route check");
    allowed
}

/// String-keyed [`has_permission`]. Unrecognised role, module or action names deny.
pub fn has_permission_by_name(role: &str, module: &str, action: &str) -> bool {
    match (role.parse::<Role>(), module.parse::<Module>(), action.parse::<Action>()) {
        (Ok(role), Ok(module), Ok(action)) => has_permission(role, module, action),
        _ => {
            debug!(role, module, action, "Permission check on unknown name denied");
            false
        }
    }
}

/// String-keyed [`can_access_route`]. An unrecognised role name denies.
pub fn can_access_route_by_name(role: &str, route: &str) -> bool {
    role.parse::<Role>()
        .map(|role| can_access_route(role, route))
        .unwrap_or(false)
}

/// Access checks bound to one signed-in user
#[derive(Debug, Clone)]
pub struct AccessContext {
    user: CurrentUser,
}

impl AccessContext {
    pub fn new(user: CurrentUser) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn has_permission(&self, module: Module, action: Action) -> bool {
        has_permission(self.user.role, module, action)
    }

    pub fn can_access_route(&self, route: &str) -> bool {
        can_access_route(self.user.role, route)
    }

    /// Check if this context has all specified permissions
    pub fn has_all_permissions(&self, required: &[(Module, Action)]) -> bool {
        required.iter().all(|(m, a)| self.has_permission(*m, *a))
    }

    /// Check if this context has any of the specified permissions
    pub fn has_any_permission(&self, required: &[(Module, Action)]) -> bool {
        required.iter().any(|(m, a)| self.has_permission(*m, *a))
    }

    /// Require a specific permission
    pub fn require_permission(&self, module: Module, action: Action) -> Result<(), AccessDenied> {
        if self.has_permission(module, action) {
            Ok(())
        } else {
            Err(AccessDenied {
                role: self.user.role,
                module,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: Role) -> AccessContext {
        AccessContext::new(CurrentUser::new("u1", "Test User", "test@example.com", role))
    }

    #[test]
    fn test_direct_permission() {
        assert!(has_permission(Role::Manager, Module::Attendance, Action::View));
        assert!(has_permission(Role::Manager, Module::Attendance, Action::Manage));
        assert!(!has_permission(Role::Manager, Module::Attendance, Action::Delete));
    }

    #[test]
    fn test_missing_module_denies() {
        assert!(!has_permission(Role::Employee, Module::Payroll, Action::View));
        assert!(!has_permission(Role::Manager, Module::Settings, Action::View));
    }

    #[test]
    fn test_by_name_matches_typed() {
        assert!(has_permission_by_name("admin", "payroll", "process"));
        assert!(!has_permission_by_name("admin", "Payroll", "process"));
        assert!(!has_permission_by_name("admin", "payroll", "launch"));
        assert!(!has_permission_by_name("root", "payroll", "process"));
    }

    #[test]
    fn test_route_by_name() {
        assert!(can_access_route_by_name("employee", "/attendance"));
        assert!(!can_access_route_by_name("employee", "/employees"));
        assert!(!can_access_route_by_name("intern", "/"));
    }

    #[test]
    fn test_route_check_agrees_with_allow_list() {
        use crate::registry::get_accessible_routes;

        for role in Role::ALL {
            let routes = get_accessible_routes(role);
            for module in Module::ALL {
                assert_eq!(
                    can_access_route(role, module.route()),
                    routes.contains(module.route()),
                    "{role} {}",
                    module.route()
                );
            }
            assert!(!can_access_route(role, "/attendance/123"));
            assert!(!can_access_route(role, "/Payroll"));
            assert!(!can_access_route(role, ""));
        }
    }

    #[test]
    fn test_context_any_all() {
        let ctx = context(Role::Manager);
        assert!(ctx.has_all_permissions(&[
            (Module::Recruitment, Action::View),
            (Module::Recruitment, Action::Approve),
        ]));
        assert!(!ctx.has_all_permissions(&[
            (Module::Recruitment, Action::View),
            (Module::Payroll, Action::View),
        ]));
        assert!(ctx.has_any_permission(&[
            (Module::Payroll, Action::View),
            (Module::Reports, Action::Export),
        ]));
        assert!(!ctx.has_any_permission(&[]));
    }

    #[test]
    fn test_require_permission() {
        let ctx = context(Role::Employee);
        assert!(ctx.require_permission(Module::Helpdesk, Action::Create).is_ok());

        let denied = ctx.require_permission(Module::Payroll, Action::Process).unwrap_err();
        assert_eq!(denied.role, Role::Employee);
        assert_eq!(denied.module, Module::Payroll);
        assert_eq!(denied.action, Action::Process);
        assert_eq!(denied.to_string(), "Role employee may not process payroll");
    }

    #[test]
    fn test_hr_manager_denied_everywhere() {
        let ctx = context(Role::HrManager);
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(!ctx.has_permission(module, action));
            }
            assert!(!ctx.can_access_route(module.route()));
        }
    }
}
