//! Role Permission Registry
//!
//! The compiled-in table of what each role may do. Route allow-lists are
//! derived from it: a module's route is reachable iff the role holds
//! [`Action::View`] on that module.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::module::Action::{self, *};
use crate::module::Module;
use crate::role::Role;

/// The actions a role may perform within one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    pub module: Module,
    pub actions: &'static [Action],
}

impl PermissionEntry {
    pub const fn new(module: Module, actions: &'static [Action]) -> Self {
        Self { module, actions }
    }

    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

const FULL: &[Action] = &[View, Create, Edit, Delete, Manage];
const FULL_APPROVE: &[Action] = &[View, Create, Edit, Delete, Manage, Approve];
const FULL_EXPORT: &[Action] = &[View, Create, Edit, Delete, Manage, Export];

const ADMIN: &[PermissionEntry] = &[
    PermissionEntry::new(Module::Dashboard, FULL),
    PermissionEntry::new(Module::Organization, FULL),
    PermissionEntry::new(Module::Employees, FULL),
    PermissionEntry::new(Module::Recruitment, FULL_APPROVE),
    PermissionEntry::new(Module::Attendance, FULL_APPROVE),
    PermissionEntry::new(Module::Payroll, &[View, Create, Edit, Delete, Manage, Process, Export]),
    PermissionEntry::new(Module::Performance, FULL_APPROVE),
    PermissionEntry::new(Module::Learning, FULL),
    PermissionEntry::new(Module::Reports, FULL_EXPORT),
    PermissionEntry::new(Module::Helpdesk, FULL),
    PermissionEntry::new(Module::Settings, FULL),
    PermissionEntry::new(Module::Notifications, FULL),
    PermissionEntry::new(Module::Calendar, FULL),
    PermissionEntry::new(Module::Documents, FULL),
    PermissionEntry::new(Module::UserActivity, FULL_EXPORT),
];

const MANAGER: &[PermissionEntry] = &[
    PermissionEntry::new(Module::Dashboard, &[View]),
    PermissionEntry::new(Module::Organization, &[View]),
    PermissionEntry::new(Module::Employees, &[View, Edit]),
    PermissionEntry::new(Module::Recruitment, &[View, Create, Edit, Approve]),
    PermissionEntry::new(Module::Attendance, &[View, Manage]),
    PermissionEntry::new(Module::Performance, &[View, Create, Edit, Approve]),
    PermissionEntry::new(Module::Learning, &[View, Create]),
    PermissionEntry::new(Module::Reports, &[View, Export]),
    PermissionEntry::new(Module::Helpdesk, &[View, Create]),
    PermissionEntry::new(Module::Notifications, &[View]),
    PermissionEntry::new(Module::Calendar, &[View, Create]),
    PermissionEntry::new(Module::Documents, &[View, Create]),
];

const EMPLOYEE: &[PermissionEntry] = &[
    PermissionEntry::new(Module::Dashboard, &[View]),
    PermissionEntry::new(Module::Attendance, &[View, Create]),
    PermissionEntry::new(Module::Performance, &[View]),
    PermissionEntry::new(Module::Learning, &[View]),
    PermissionEntry::new(Module::Helpdesk, &[View, Create]),
    PermissionEntry::new(Module::Notifications, &[View]),
    PermissionEntry::new(Module::Calendar, &[View]),
    PermissionEntry::new(Module::Documents, &[View]),
];

/// Permission entries granted to `role`, in registry order.
///
/// Roles without a table (currently `hr_manager`) get an empty slice, which
/// every caller treats as "no access".
pub fn get_permissions(role: Role) -> &'static [PermissionEntry] {
    match role {
        Role::Admin => ADMIN,
        Role::Manager => MANAGER,
        Role::Employee => EMPLOYEE,
        Role::HrManager => &[],
    }
}

/// Literal routes `role` may view
pub fn get_accessible_routes(role: Role) -> BTreeSet<&'static str> {
    accessible_modules(role).map(|m| m.route()).collect()
}

/// Modules whose route `role` may view, in registry order
pub fn accessible_modules(role: Role) -> impl Iterator<Item = Module> {
    get_permissions(role)
        .iter()
        .filter(|entry| entry.allows(Action::View))
        .map(|entry| entry.module)
}

/// Find the entry for `module` in `role`'s table
pub fn entry_for(role: Role, module: Module) -> Option<&'static PermissionEntry> {
    get_permissions(role).iter().find(|entry| entry.module == module)
}

/// String-keyed [`get_permissions`]. Any unrecognised name yields an empty slice.
pub fn get_permissions_by_name(role: &str) -> &'static [PermissionEntry] {
    role.parse::<Role>().map(get_permissions).unwrap_or(&[])
}

/// String-keyed [`get_accessible_routes`]. Any unrecognised name yields an empty set.
pub fn get_accessible_routes_by_name(role: &str) -> BTreeSet<&'static str> {
    role.parse::<Role>()
        .map(get_accessible_routes)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_modules_unique_per_role() {
        for role in Role::ALL {
            let entries = get_permissions(role);
            let modules: HashSet<Module> = entries.iter().map(|e| e.module).collect();
            assert_eq!(modules.len(), entries.len(), "duplicate module entry for {}", role);
        }
    }

    #[test]
    fn test_no_empty_action_sets() {
        for role in Role::ALL {
            for entry in get_permissions(role) {
                assert!(!entry.actions.is_empty(), "{} has an empty {} entry", role, entry.module);
            }
        }
    }

    #[test]
    fn test_admin_covers_every_module() {
        for module in Module::ALL {
            let entry = entry_for(Role::Admin, module).expect("admin entry");
            assert!(entry.allows(Action::View));
        }
    }

    #[test]
    fn test_hr_manager_has_no_grants() {
        assert!(get_permissions(Role::HrManager).is_empty());
        assert!(get_accessible_routes(Role::HrManager).is_empty());
    }

    #[test]
    fn test_employee_routes() {
        let routes = get_accessible_routes(Role::Employee);
        assert!(routes.contains("/"));
        assert!(routes.contains("/attendance"));
        assert!(!routes.contains("/employees"));
        assert!(!routes.contains("/payroll"));
    }

    #[test]
    fn test_routes_follow_view_grants() {
        for role in Role::ALL {
            let expected: BTreeSet<&str> = get_permissions(role)
                .iter()
                .filter(|e| e.actions.contains(&Action::View))
                .map(|e| e.module.route())
                .collect();
            assert_eq!(get_accessible_routes(role), expected);
        }
    }

    #[test]
    fn test_unknown_names_are_empty() {
        assert!(get_permissions_by_name("superuser").is_empty());
        assert!(get_permissions_by_name("").is_empty());
        assert!(get_permissions_by_name("Admin").is_empty());
        assert!(get_accessible_routes_by_name("guest").is_empty());
        assert_eq!(get_permissions_by_name("manager").len(), get_permissions(Role::Manager).len());
    }
}
