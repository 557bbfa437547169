use crate::errors::internal::{AccessError, ApprovalError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Where unauthenticated callers are sent
pub const LOGIN_PATH: &str = "/api/login";

/// Where denied callers are sent
pub const DASHBOARD_PATH: &str = "/api/dashboard";

/// Notice body returned with every portal error
#[derive(Object, Debug)]
pub struct PortalErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable notice shown to the user
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Errors for the gated portal endpoints (dashboard, queues, submission, directory)
///
/// Authentication and authorization refusals are redirects: the body carries the
/// notice to display and `Location` points at the page the caller lands on.
#[derive(ApiResponse, Debug)]
pub enum PortalError {
    /// Not logged in, redirected to the login page
    #[oai(status = 303)]
    LoginRequired(
        Json<PortalErrorResponse>,
        #[oai(header = "Location")] String,
    ),

    /// Role may not perform this action, redirected to own dashboard
    #[oai(status = 303)]
    AccessDenied(
        Json<PortalErrorResponse>,
        #[oai(header = "Location")] String,
    ),

    /// Submitted form is missing required values
    #[oai(status = 400)]
    ValidationFailed(Json<PortalErrorResponse>),

    /// No such request in the caller's scope
    #[oai(status = 404)]
    NotFound(Json<PortalErrorResponse>),

    /// The request is not waiting on this stage
    #[oai(status = 409)]
    WrongState(Json<PortalErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<PortalErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<PortalErrorResponse> {
    Json(PortalErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl PortalError {
    pub fn login_required() -> Self {
        PortalError::LoginRequired(
            body("login_required", "Please log in to continue", 303),
            LOGIN_PATH.to_string(),
        )
    }

    pub fn access_denied() -> Self {
        PortalError::AccessDenied(
            body("access_denied", "You are not authorized to access this page", 303),
            DASHBOARD_PATH.to_string(),
        )
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        PortalError::ValidationFailed(body("validation_failed", message, 400))
    }

    pub fn not_found() -> Self {
        PortalError::NotFound(body("not_found", "No-due request not found", 404))
    }

    pub fn wrong_state(message: impl Into<String>) -> Self {
        PortalError::WrongState(body("wrong_state", message, 409))
    }

    /// Convert InternalError to PortalError
    ///
    /// Access and validation outcomes are recoverable and carry a notice;
    /// infrastructure failures are logged and reported generically.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Access(AccessError::Unauthenticated) => {
                tracing::debug!("Unauthenticated access to gated endpoint");
                Self::login_required()
            }
            InternalError::Access(ref denied @ AccessError::Denied { .. }) => {
                tracing::info!("{}", denied);
                Self::access_denied()
            }

            InternalError::Approval(
                ApprovalError::RequestNotFound { request_id }
                | ApprovalError::OutOfScope { request_id },
            ) => {
                // Out-of-scope requests are reported exactly like missing ones
                tracing::debug!(request_id, "No-due request not visible to caller");
                Self::not_found()
            }
            InternalError::Approval(ref e @ ApprovalError::WrongState { .. }) => {
                tracing::info!("Rejected transition: {}", e);
                Self::wrong_state(e.to_string())
            }
            InternalError::Approval(ref e @ ApprovalError::CommentRequired { .. }) => {
                Self::validation_failed(e.to_string())
            }
            InternalError::Approval(ApprovalError::InconsistentFields(ref fields)) => {
                tracing::error!("Stored request has inconsistent approval fields: {}", fields);
                Self::internal_server_error()
            }

            InternalError::Validation(e) => {
                tracing::debug!("Validation failed: {}", e);
                Self::validation_failed(e.to_string())
            }

            other => {
                tracing::error!("Internal error in portal operation: {}", other);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        PortalError::InternalError(body("internal_error", "An internal error occurred", 500))
    }

    /// Get the notice from the error variant
    pub fn message(&self) -> String {
        match self {
            PortalError::LoginRequired(json, _) => json.0.message.clone(),
            PortalError::AccessDenied(json, _) => json.0.message.clone(),
            PortalError::ValidationFailed(json) => json.0.message.clone(),
            PortalError::NotFound(json) => json.0.message.clone(),
            PortalError::WrongState(json) => json.0.message.clone(),
            PortalError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Redirect target for the redirecting variants
    pub fn location(&self) -> Option<&str> {
        match self {
            PortalError::LoginRequired(_, location) | PortalError::AccessDenied(_, location) => {
                Some(location)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
