//! HR Portal Access Control
//!
//! Role-based access control for the HR portal:
//! - Role permission registry (static, compiled in)
//! - Access decisions by module/action and by route
//! - Route allow-lists derived from `view` grants
//!
//! Every check is fail-closed and total: an unknown role, module, action or
//! route is a denial, never a fault.

pub mod decision;
pub mod error;
pub mod module;
pub mod registry;
pub mod role;
pub mod user;

pub use decision::{
    can_access_route, can_access_route_by_name, has_permission, has_permission_by_name,
    AccessContext,
};
pub use error::{AccessDenied, AccessError};
pub use module::{Action, Module};
pub use registry::{
    accessible_modules, get_accessible_routes, get_accessible_routes_by_name, get_permissions,
    get_permissions_by_name, PermissionEntry,
};
pub use role::Role;
pub use user::CurrentUser;
