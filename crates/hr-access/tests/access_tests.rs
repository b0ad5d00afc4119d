//! Access Control Integration Tests
//!
//! Registry and decision behaviour through the public API.

use hr_access::{
    can_access_route, can_access_route_by_name, get_accessible_routes, get_permissions,
    get_permissions_by_name, has_permission, has_permission_by_name, Action, Module, Role,
};

const ODD_STRINGS: &[&str] = &[
    "",
    " ",
    "payroll ",
    "PAYROLL",
    "*",
    "*:*",
    "payroll:process",
    "../payroll",
    "ünïcode",
    "/payroll",
];

mod decision_tests {
    use super::*;

    #[test]
    fn test_totality_over_arbitrary_names() {
        let role_names: Vec<&str> = Role::ALL
            .iter()
            .map(|r| r.as_str())
            .chain(["root", "guest", "hr-manager", ""])
            .collect();

        for role in &role_names {
            for module in ODD_STRINGS.iter().copied().chain(Module::ALL.iter().map(|m| m.as_str())) {
                for action in ODD_STRINGS.iter().copied().chain(Action::ALL.iter().map(|a| a.as_str())) {
                    // Must return without panicking; odd strings never grant.
                    let allowed = has_permission_by_name(role, module, action);
                    if ODD_STRINGS.contains(&module) || ODD_STRINGS.contains(&action) {
                        assert!(!allowed, "{role}/{module}/{action} granted");
                    }
                }
            }
        }
    }

    #[test]
    fn test_employee_cannot_process_payroll() {
        assert!(!has_permission(Role::Employee, Module::Payroll, Action::Process));
        assert!(!has_permission_by_name("employee", "payroll", "process"));
    }

    #[test]
    fn test_manager_cannot_delete_attendance() {
        assert!(has_permission(Role::Manager, Module::Attendance, Action::View));
        assert!(has_permission(Role::Manager, Module::Attendance, Action::Manage));
        assert!(!has_permission(Role::Manager, Module::Attendance, Action::Delete));
        assert!(!has_permission_by_name("manager", "attendance", "delete"));
    }

    #[test]
    fn test_admin_can_process_payroll() {
        assert!(has_permission(Role::Admin, Module::Payroll, Action::Process));
        assert!(has_permission_by_name("admin", "payroll", "process"));
    }

    #[test]
    fn test_every_grant_in_table_is_honoured() {
        for role in Role::ALL {
            for entry in get_permissions(role) {
                for action in Action::ALL {
                    assert_eq!(
                        has_permission(role, entry.module, action),
                        entry.actions.contains(&action),
                    );
                }
            }
        }
    }
}

mod route_tests {
    use super::*;

    #[test]
    fn test_route_exact_match_only() {
        assert!(can_access_route(Role::Employee, "/"));
        assert!(can_access_route(Role::Employee, "/attendance"));
        assert!(!can_access_route(Role::Employee, "/employees"));
        assert!(!can_access_route(Role::Employee, "/attendance/123"));
        assert!(!can_access_route(Role::Employee, "/attendance/"));
        assert!(!can_access_route(Role::Employee, "/Attendance"));
        assert!(!can_access_route(Role::Admin, "/payroll/run"));
    }

    #[test]
    fn test_unknown_routes_denied_for_all_roles() {
        for role in Role::ALL {
            assert!(!can_access_route(role, "/admin"));
            assert!(!can_access_route(role, ""));
            assert!(!can_access_route(role, "payroll"));
        }
    }

    #[test]
    fn test_admin_reaches_every_module_route() {
        for module in Module::ALL {
            assert!(can_access_route(Role::Admin, module.route()));
        }
    }

    #[test]
    fn test_manager_routes() {
        let routes = get_accessible_routes(Role::Manager);
        assert!(routes.contains("/employees"));
        assert!(routes.contains("/recruitment"));
        assert!(!routes.contains("/payroll"));
        assert!(!routes.contains("/settings"));
        assert!(!routes.contains("/user-activity"));
    }

    #[test]
    fn test_unknown_role_name_has_nothing() {
        assert!(get_permissions_by_name("contractor").is_empty());
        assert!(!can_access_route_by_name("contractor", "/"));
    }
}
