//! Sidebar navigation
//!
//! Menu items are shown only for routes the role may open, so the sidebar
//! and the route guard always agree.

use hr_access::{can_access_route, Module, Role};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub module: Module,
    pub label: String,
    pub route: String,
}

impl MenuItem {
    fn for_module(module: Module) -> Self {
        Self {
            module,
            label: module.label().to_string(),
            route: module.route().to_string(),
        }
    }
}

/// Menu items visible to `role`, in sidebar order
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    Module::ALL
        .into_iter()
        .filter(|m| can_access_route(role, m.route()))
        .map(MenuItem::for_module)
        .collect()
}
