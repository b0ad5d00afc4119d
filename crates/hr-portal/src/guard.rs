//! Route Guard
//!
//! Gates a route behind [`can_access_route`]. Per request the guard is in
//! exactly one of four states:
//!
//! | Session | Access | Result |
//! |---------|--------|--------|
//! | none | - | nothing (`401`, empty body) |
//! | user | granted | inner handler runs unchanged |
//! | user | denied, fallback set | the fallback markup (`403`) |
//! | user | denied, no fallback | built-in "Access Restricted" notice (`403`) |
//!
//! A denial is an expected outcome, not an error.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use hr_access::{can_access_route, CurrentUser, Role};
use tower::{Layer, Service};
use tracing::info;

use crate::pages;
use crate::session::CurrentSession;

/// What the guard decided for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No signed-in user; defer to the upstream authentication guard
    Nothing,
    /// Access granted; render the guarded content
    Render,
    /// Access denied; render the caller's fallback
    Fallback,
    /// Access denied; render the built-in notice naming the role
    Restricted { role: Role },
}

#[derive(Debug, Clone)]
enum GuardedRoute {
    Fixed(String),
    RequestPath,
}

/// Route-level access check with an optional custom denial page
#[derive(Debug, Clone)]
pub struct RouteGuard {
    route: GuardedRoute,
    fallback: Option<Arc<str>>,
}

impl RouteGuard {
    /// Guard a specific route regardless of the request path
    pub fn for_route(route: impl Into<String>) -> Self {
        Self {
            route: GuardedRoute::Fixed(route.into()),
            fallback: None,
        }
    }

    /// Guard whatever path the request targets. Paths not enumerated in the
    /// role's allow-list (including sub-paths of granted routes) are denied.
    pub fn from_request_path() -> Self {
        Self {
            route: GuardedRoute::RequestPath,
            fallback: None,
        }
    }

    /// Render `markup` instead of the built-in notice on denial
    pub fn with_fallback(mut self, markup: impl Into<String>) -> Self {
        self.fallback = Some(Arc::from(markup.into()));
        self
    }

    /// The route checked for a request to `request_path`
    pub fn route_for<'a>(&'a self, request_path: &'a str) -> &'a str {
        match &self.route {
            GuardedRoute::Fixed(route) => route,
            GuardedRoute::RequestPath => request_path,
        }
    }

    pub fn evaluate(&self, user: Option<&CurrentUser>, route: &str) -> GuardOutcome {
        match user {
            None => GuardOutcome::Nothing,
            Some(user) if can_access_route(user.role, route) => GuardOutcome::Render,
            Some(_) if self.fallback.is_some() => GuardOutcome::Fallback,
            Some(user) => GuardOutcome::Restricted { role: user.role },
        }
    }

    /// Response for a non-rendering outcome; `None` means run the inner handler
    pub fn respond(&self, outcome: GuardOutcome) -> Option<Response> {
        match outcome {
            GuardOutcome::Render => None,
            GuardOutcome::Nothing => Some(StatusCode::UNAUTHORIZED.into_response()),
            GuardOutcome::Fallback => {
                let markup = self.fallback.as_deref().unwrap_or_default().to_string();
                Some((StatusCode::FORBIDDEN, Html(markup)).into_response())
            }
            GuardOutcome::Restricted { role } => Some(
                (StatusCode::FORBIDDEN, Html(pages::access_restricted(role))).into_response(),
            ),
        }
    }
}

/// Layer applying a [`RouteGuard`] to the wrapped service
#[derive(Debug, Clone)]
pub struct RouteGuardLayer {
    guard: RouteGuard,
}

impl RouteGuardLayer {
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard }
    }
}

impl<S> Layer<S> for RouteGuardLayer {
    type Service = RouteGuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RouteGuardService {
            inner,
            guard: self.guard.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuardService<S> {
    inner: S,
    guard: RouteGuard,
}

impl<S, B> Service<Request<B>> for RouteGuardService<S>
where
    S: Service<Request<B>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let denial = {
            let user = req
                .extensions()
                .get::<CurrentSession>()
                .and_then(CurrentSession::user);
            let route = self.guard.route_for(req.uri().path());
            let outcome = self.guard.evaluate(user, route);

            if let (Some(user), GuardOutcome::Fallback | GuardOutcome::Restricted { .. }) =
                (user, outcome)
            {
                info!(user_id = %user.id, role = %user.role, route, "Route access denied");
            }

            self.guard.respond(outcome)
        };

        match denial {
            Some(response) => Box::pin(async move { Ok(response) }),
            None => {
                // Serve with the instance that was polled ready.
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(inner.call(req))
            }
        }
    }
}
