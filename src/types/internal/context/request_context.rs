use std::net::IpAddr;

use poem::Request;
use poem::web::cookie::Cookie;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::errors::InternalError;
use crate::providers::AuthenticationProvider;
use crate::types::internal::Principal;

use super::{request_id::RequestId, request_source::RequestSource};

/// Name of the cookie carrying the opaque session token
pub const SESSION_COOKIE: &str = "nodue_session";

/// Request context that flows through all layers
///
/// Carries the authenticated principal explicitly so that access checks and
/// approval transitions never consult ambient "current user" state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Principal resolved from the session, if any
    pub principal: Option<Principal>,

    /// Raw session token presented with the request, needed to end the session
    pub session_token: Option<String>,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            session_token: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create an unauthenticated API context
    pub fn anonymous() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            session_token: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Build the context for an incoming HTTP request
    ///
    /// Presented tokens are tried in order: the `nodue_session` cookie, then an
    /// `Authorization: Bearer` header. The first one that matches a live session
    /// wins. Unknown or expired tokens leave the context unauthenticated; the
    /// access policy decides what an anonymous caller may do.
    ///
    /// # Arguments
    /// * `req` - The HTTP request
    /// * `authentication_provider` - Resolves session tokens to principals
    ///
    /// # Returns
    /// * `Ok(RequestContext)` - Authenticated or anonymous context
    /// * `Err(InternalError)` - Session lookup failed (storage outage, corrupt user row)
    pub async fn from_request(
        req: &Request,
        authentication_provider: &AuthenticationProvider,
    ) -> Result<Self, InternalError> {
        let mut ctx = Self::anonymous();
        ctx.ip_address = Self::extract_ip_address(req);

        for token in Self::presented_session_tokens(req) {
            match authentication_provider.resolve_session(&token).await? {
                Some(principal) => {
                    ctx = ctx.with_principal(principal);
                    ctx.session_token = Some(token);
                    break;
                }
                None => {
                    tracing::debug!(request_id = %ctx.request_id, "Session token not recognised");
                }
            }
        }

        tracing::trace!("Request context created: {:?}", ctx);
        Ok(ctx)
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Session tokens presented with the request, cookie first
    fn presented_session_tokens(req: &Request) -> Vec<String> {
        let from_cookie = req
            .headers()
            .get_all(poem::http::header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';').map(str::trim))
            .filter_map(|cookie_str| Cookie::parse(cookie_str).ok())
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value_str().to_string());
        let from_bearer = Bearer::from_request(req).ok().map(|bearer| bearer.token);

        let mut tokens: Vec<String> = from_cookie
            .into_iter()
            .chain(from_bearer)
            .filter(|token| !token.is_empty())
            .collect();
        tokens.dedup();
        tokens
    }

    /// Attach an authenticated principal
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.actor_id = principal.user_id.clone();
        self.principal = Some(principal);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
