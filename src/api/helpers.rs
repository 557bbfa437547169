use std::time::Duration;

use poem::Request;
use poem::web::cookie::{Cookie, SameSite};

use crate::errors::InternalError;
use crate::providers::AuthenticationProvider;
use crate::types::internal::RequestContext;
use crate::types::internal::context::request_context::SESSION_COOKIE;

/// Build the request context for an endpoint
///
/// Resolves the session (cookie or bearer) into a principal when present.
/// A failed session lookup is an internal error, never an anonymous caller.
pub async fn build_request_context(
    req: &Request,
    authentication_provider: &AuthenticationProvider,
) -> Result<RequestContext, InternalError> {
    RequestContext::from_request(req, authentication_provider).await
}

/// `Set-Cookie` value carrying a new session token
pub fn session_cookie(token: &str, ttl: Duration) -> String {
    let mut cookie = Cookie::new_with_str(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(ttl);
    cookie.to_string()
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn cleared_session_cookie() -> String {
    session_cookie("", Duration::ZERO)
}
