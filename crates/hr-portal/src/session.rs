//! Session Middleware
//!
//! Resolves the signed-in user for every request and exposes it to handlers
//! and route guards. The user id comes from the session header first, then
//! the session cookie, then (dev mode only) the configured default user.
//! There are no credentials: this layer stands in for a real identity
//! provider.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, Request},
};
use axum_extra::extract::cookie::CookieJar;
use hr_access::{AccessContext, CurrentUser};
use hr_config::SessionConfig;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::PortalError;
use crate::state::PortalState;

/// The user resolved for the current request, if any
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<CurrentUser>);

impl CurrentSession {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

/// Read the session user id from the header, falling back to the cookie
pub fn session_user_id(headers: &HeaderMap, session: &SessionConfig) -> Option<String> {
    headers
        .get(session.header_name.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or_else(|| {
            CookieJar::from_headers(headers)
                .get(&session.cookie_name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })
}

/// Resolve the request's user against the directory
pub fn resolve_user(state: &PortalState, headers: &HeaderMap) -> Option<CurrentUser> {
    let user_id = session_user_id(headers, &state.session).or_else(|| {
        if state.dev_mode {
            state.session.default_user.clone()
        } else {
            None
        }
    })?;

    match state.directory.get(&user_id) {
        Some(user) => {
            debug!(user_id = %user.id, role = %user.role, "Session resolved");
            Some(user.clone())
        }
        None => {
            warn!(user_id = %user_id, "Session names unknown user");
            None
        }
    }
}

/// Middleware layer that resolves the session and injects it, together with
/// the portal state, into request extensions
#[derive(Clone)]
pub struct SessionLayer {
    state: PortalState,
}

impl SessionLayer {
    pub fn new(state: PortalState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionMiddleware {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SessionMiddleware<S> {
    inner: S,
    state: PortalState,
}

impl<S, B> Service<Request<B>> for SessionMiddleware<S>
where
    S: Service<Request<B>> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let session = CurrentSession(resolve_user(&self.state, req.headers()));
        req.extensions_mut().insert(session);

        let future = self.inner.call(req);
        Box::pin(future)
    }
}

/// Signed-in user extractor. Rejects with 401 when there is no session.
pub struct Authenticated(pub AccessContext);

impl std::ops::Deref for Authenticated {
    type Target = AccessContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<CurrentSession>()
            .ok_or_else(|| PortalError::internal("Session layer not configured"))?;

        let user = session
            .user()
            .cloned()
            .ok_or_else(|| PortalError::unauthorized("No active session"))?;

        Ok(Authenticated(AccessContext::new(user)))
    }
}

/// Optional session extractor; never rejects
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentSession>()
            .and_then(|s| s.0.clone());
        Ok(OptionalUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};
    use hr_access::Role;
    use hr_config::AppConfig;

    fn state(dev_mode: bool, default_user: Option<&str>) -> PortalState {
        let mut config = AppConfig::default();
        config.dev_mode = dev_mode;
        config.session.default_user = default_user.map(String::from);
        PortalState::from_config(&config).unwrap()
    }

    #[test]
    fn test_header_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("x-hr-user", HeaderValue::from_static("manager"));
        headers.insert(COOKIE, HeaderValue::from_static("hr_session=employee"));

        let user = resolve_user(&state(false, None), &headers).unwrap();
        assert_eq!(user.role, Role::Manager);
    }

    #[test]
    fn test_cookie_session() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; hr_session=employee"));

        let user = resolve_user(&state(false, None), &headers).unwrap();
        assert_eq!(user.id, "employee");
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("hr_session_old=admin"));

        assert!(resolve_user(&state(false, None), &headers).is_none());
    }

    #[test]
    fn test_unknown_user_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert("x-hr-user", HeaderValue::from_static("mallory"));

        assert!(resolve_user(&state(false, None), &headers).is_none());
    }

    #[test]
    fn test_default_user_only_in_dev_mode() {
        let headers = HeaderMap::new();
        assert!(resolve_user(&state(false, Some("admin")), &headers).is_none());

        let user = resolve_user(&state(true, Some("admin")), &headers).unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
