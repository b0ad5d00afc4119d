//! Portal Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hr_access::AccessDenied;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authorization error: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortalError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

impl From<AccessDenied> for PortalError {
    fn from(denied: AccessDenied) -> Self {
        Self::forbidden(denied.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PortalError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PortalError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PortalError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            PortalError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            PortalError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_access::{Action, Module, Role};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PortalError::not_found("User", "x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PortalError::unauthorized("no session").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PortalError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_access_denied_is_forbidden() {
        let err: PortalError = AccessDenied {
            role: Role::Manager,
            module: Module::Settings,
            action: Action::View,
        }
        .into();
        assert_eq!(err.to_string(), "Forbidden: Role manager may not view settings");
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
