//! HR Portal Web Surface
//!
//! Axum router around the access core:
//! - Session resolution from the mock user directory
//! - Route guards with the "Access Restricted" notice
//! - Sidebar navigation and access-check APIs
//! - Health probes and OpenAPI document

pub mod access_api;
pub mod app;
pub mod error;
pub mod guard;
pub mod health_api;
pub mod navigation;
pub mod pages;
pub mod session;
pub mod state;

pub use app::{portal_router, portal_router_with_fallback, ApiDoc};
pub use error::{PortalError, Result};
pub use guard::{GuardOutcome, RouteGuard, RouteGuardLayer};
pub use navigation::{menu_for, MenuItem};
pub use session::{Authenticated, CurrentSession, OptionalUser, SessionLayer};
pub use state::{PortalState, UserDirectory};
