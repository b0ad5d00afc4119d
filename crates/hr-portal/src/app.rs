//! Router assembly

use axum::{http::Uri, response::Html, routing::get, Router};
use hr_access::Module;
use utoipa::OpenApi;

use crate::access_api::{self, access_router};
use crate::error::{ErrorResponse, PortalError};
use crate::guard::{RouteGuard, RouteGuardLayer};
use crate::health_api::{self, health_router};
use crate::navigation::MenuItem;
use crate::pages;
use crate::session::{Authenticated, SessionLayer};
use crate::state::PortalState;

#[derive(OpenApi)]
#[openapi(
    info(title = "HR Portal API", description = "Access control and session endpoints of the HR portal"),
    paths(
        access_api::access_me,
        access_api::check_permission,
        access_api::check_route,
        access_api::navigation,
        access_api::role_permissions,
        access_api::get_session,
        access_api::sign_in,
        access_api::sign_out,
        health_api::health,
        health_api::liveness,
        health_api::readiness,
    ),
    components(schemas(
        access_api::AccessSummary,
        access_api::PermissionDto,
        access_api::AccessDecision,
        access_api::NavigationResponse,
        access_api::RolePermissionsResponse,
        access_api::SignInRequest,
        access_api::SessionResponse,
        health_api::HealthResponse,
        MenuItem,
        ErrorResponse,
    )),
    tags(
        (name = "access", description = "Access decisions"),
        (name = "session", description = "Mock sign-in"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

/// One guarded page per module, each checked against its own route
fn module_pages(fallback: Option<&str>) -> Router<PortalState> {
    Module::ALL.into_iter().fold(Router::new(), |router, module| {
        let mut guard = RouteGuard::for_route(module.route());
        if let Some(markup) = fallback {
            guard = guard.with_fallback(markup);
        }

        router.route(
            module.route(),
            get(move |auth: Authenticated| async move {
                Html(pages::module_page(module, auth.user()))
            })
            .route_layer(RouteGuardLayer::new(guard)),
        )
    })
}

async fn not_found(uri: Uri) -> PortalError {
    PortalError::not_found("Route", uri.path())
}

/// Build the portal router
pub fn portal_router(state: PortalState) -> Router {
    build(state, None)
}

/// Build the portal router with a custom page shown on route denial
pub fn portal_router_with_fallback(state: PortalState, fallback: &str) -> Router {
    build(state, Some(fallback))
}

fn build(state: PortalState, fallback: Option<&str>) -> Router {
    Router::new()
        .merge(module_pages(fallback))
        .merge(access_router())
        .merge(health_router())
        .fallback(not_found)
        .layer(SessionLayer::new(state.clone()))
        .with_state(state)
}
