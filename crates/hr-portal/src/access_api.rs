//! Access API
//!
//! JSON endpoints the front end calls to decide what to show:
//! - `GET /api/access/me` - role, permission entries and routes of the session user
//! - `GET /api/access/check` - may the session user perform an action on a module
//! - `GET /api/access/route` - may the session user open a route
//! - `GET /api/navigation` - sidebar items for the session user
//! - `GET /api/roles/{role}/permissions` - registry view for any role name
//! - `GET|POST|DELETE /api/session` - mock sign-in used by the role switcher

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hr_access::{
    get_accessible_routes, get_permissions, get_permissions_by_name, has_permission_by_name,
    Action, CurrentUser, Module, PermissionEntry, Role,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ErrorResponse, PortalError, Result};
use crate::navigation::{menu_for, MenuItem};
use crate::session::{Authenticated, OptionalUser};
use crate::state::PortalState;

/// Actions granted within one module
#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionDto {
    pub module: Module,
    pub actions: Vec<Action>,
}

impl From<&PermissionEntry> for PermissionDto {
    fn from(entry: &PermissionEntry) -> Self {
        Self {
            module: entry.module,
            actions: entry.actions.to_vec(),
        }
    }
}

fn permission_dtos(entries: &[PermissionEntry]) -> Vec<PermissionDto> {
    entries.iter().map(PermissionDto::from).collect()
}

/// Everything the front end needs to gate its own UI
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
    pub user: CurrentUser,
    pub role: Role,
    pub role_name: String,
    pub permissions: Vec<PermissionDto>,
    pub routes: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PermissionCheckParams {
    /// Module name, e.g. `payroll`
    #[serde(default)]
    pub module: String,
    /// Action name, e.g. `process`
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteCheckParams {
    /// Literal route path, e.g. `/payroll`
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessDecision {
    pub allowed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub role: Role,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RolePermissionsResponse {
    pub role: String,
    pub permissions: Vec<PermissionDto>,
    pub routes: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: Option<CurrentUser>,
}

/// Access summary for the session user
#[utoipa::path(
    get,
    path = "/api/access/me",
    tag = "access",
    responses(
        (status = 200, description = "Access summary", body = AccessSummary),
        (status = 401, description = "No active session")
    )
)]
pub async fn access_me(auth: Authenticated) -> Json<AccessSummary> {
    let role = auth.role();
    Json(AccessSummary {
        user: auth.user().clone(),
        role,
        role_name: role.display_name().to_string(),
        permissions: permission_dtos(get_permissions(role)),
        routes: get_accessible_routes(role).into_iter().map(String::from).collect(),
    })
}

/// Check a module/action pair. Unknown names are denied.
#[utoipa::path(
    get,
    path = "/api/access/check",
    tag = "access",
    params(PermissionCheckParams),
    responses(
        (status = 200, description = "Decision", body = AccessDecision),
        (status = 401, description = "No active session")
    )
)]
pub async fn check_permission(
    auth: Authenticated,
    Query(params): Query<PermissionCheckParams>,
) -> Json<AccessDecision> {
    let allowed = has_permission_by_name(auth.role().as_str(), &params.module, &params.action);
    Json(AccessDecision { allowed })
}

/// Check a route. Exact match only.
#[utoipa::path(
    get,
    path = "/api/access/route",
    tag = "access",
    params(RouteCheckParams),
    responses(
        (status = 200, description = "Decision", body = AccessDecision),
        (status = 401, description = "No active session")
    )
)]
pub async fn check_route(
    auth: Authenticated,
    Query(params): Query<RouteCheckParams>,
) -> Json<AccessDecision> {
    Json(AccessDecision {
        allowed: auth.can_access_route(&params.path),
    })
}

/// Sidebar items for the session user
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "access",
    responses(
        (status = 200, description = "Visible menu items", body = NavigationResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn navigation(auth: Authenticated) -> Json<NavigationResponse> {
    Json(NavigationResponse {
        role: auth.role(),
        items: menu_for(auth.role()),
    })
}

/// Registry entries for any role name; unknown names are empty
#[utoipa::path(
    get,
    path = "/api/roles/{role}/permissions",
    tag = "access",
    params(("role" = String, Path, description = "Role name")),
    responses(
        (status = 200, description = "Role permissions", body = RolePermissionsResponse),
        (status = 401, description = "No active session"),
        (status = 403, description = "Missing settings:view")
    )
)]
pub async fn role_permissions(
    auth: Authenticated,
    Path(role): Path<String>,
) -> Result<Json<RolePermissionsResponse>> {
    auth.require_permission(Module::Settings, Action::View)?;

    let permissions = permission_dtos(get_permissions_by_name(&role));
    let routes = hr_access::get_accessible_routes_by_name(&role)
        .into_iter()
        .map(String::from)
        .collect();

    Ok(Json(RolePermissionsResponse {
        role,
        permissions,
        routes,
    }))
}

/// Current session, if any
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "session",
    responses((status = 200, description = "Current session", body = SessionResponse))
)]
pub async fn get_session(OptionalUser(user): OptionalUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

/// Sign in as a directory user
#[utoipa::path(
    post,
    path = "/api/session",
    tag = "session",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<PortalState>,
    jar: CookieJar,
    body: std::result::Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let Json(req) = body.map_err(|rejection| PortalError::validation(rejection.body_text()))?;

    let user = state
        .directory
        .get(&req.user_id)
        .cloned()
        .ok_or_else(|| PortalError::not_found("User", &req.user_id))?;

    info!(user_id = %user.id, role = %user.role, "Signed in");

    let cookie = Cookie::build((state.session.cookie_name.clone(), user.id.clone()))
        .path("/")
        .http_only(true)
        .secure(state.session.secure)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(SessionResponse { user: Some(user) })))
}

/// Sign out
#[utoipa::path(
    delete,
    path = "/api/session",
    tag = "session",
    responses((status = 200, description = "Signed out", body = SessionResponse))
)]
pub async fn sign_out(
    State(state): State<PortalState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let cookie = Cookie::build((state.session.cookie_name.clone(), "")).path("/");
    (jar.remove(cookie), Json(SessionResponse { user: None }))
}

pub fn access_router() -> Router<PortalState> {
    Router::new()
        .route("/api/access/me", get(access_me))
        .route("/api/access/check", get(check_permission))
        .route("/api/access/route", get(check_route))
        .route("/api/navigation", get(navigation))
        .route("/api/roles/{role}/permissions", get(role_permissions))
        .route(
            "/api/session",
            get(get_session).post(sign_in).delete(sign_out),
        )
}
