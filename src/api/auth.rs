use std::sync::Arc;
use std::time::Duration;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::{DashboardCoordinator, LoginCoordinator};
use crate::errors::api::portal::{DASHBOARD_PATH, LOGIN_PATH};
use crate::errors::{AuthError, PortalError};
use crate::providers::AuthenticationProvider;
use crate::types::dto::auth::{
    LoginApiResponse, LoginRequest, LoginResponse, LogoutApiResponse, LogoutResponse,
};
use crate::types::dto::dashboard::DashboardResponse;

/// Login, logout and dashboard endpoints
pub struct AuthApi {
    login_coordinator: LoginCoordinator,
    dashboard_coordinator: DashboardCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
    session_ttl: Duration,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            login_coordinator: LoginCoordinator::new(app_data.clone()),
            dashboard_coordinator: DashboardCoordinator::new(app_data.clone()),
            authentication_provider: Arc::clone(&app_data.providers.authentication_provider),
            session_ttl: app_data.session_ttl,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Session management
    Authentication,
    /// Role-specific landing page
    Dashboard,
}

#[OpenApi]
impl AuthApi {
    /// Log in with username and password
    ///
    /// On success a session is opened and its token is returned both in the body
    /// and as the `nodue_session` cookie. The client should continue to the dashboard.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<LoginApiResponse, AuthError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(AuthError::from_internal_error)?;

        let (session, principal) = self
            .login_coordinator
            .login(&ctx, &body.username, &body.password)
            .await
            .map_err(AuthError::from_internal_error)?;

        let cookie = helpers::session_cookie(&session.token, self.session_ttl);
        Ok(LoginApiResponse::Ok(
            Json(LoginResponse {
                session_token: session.token,
                expires_at: session.expires_at,
                username: principal.username,
                role: principal.role.to_string(),
                redirect_to: DASHBOARD_PATH.to_string(),
            }),
            cookie,
        ))
    }

    /// End the current session and clear the session cookie
    #[oai(path = "/logout", method = "get", tag = "AuthTags::Authentication")]
    async fn logout(&self, req: &Request) -> Result<LogoutApiResponse, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        self.login_coordinator
            .logout(&ctx)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(LogoutApiResponse::Ok(
            Json(LogoutResponse {
                message: "Logged out successfully".to_string(),
                redirect_to: LOGIN_PATH.to_string(),
            }),
            helpers::cleared_session_cookie(),
        ))
    }

    /// Role-specific dashboard for the logged-in user
    #[oai(path = "/dashboard", method = "get", tag = "AuthTags::Dashboard")]
    async fn dashboard(&self, req: &Request) -> Result<Json<DashboardResponse>, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let view = self
            .dashboard_coordinator
            .dashboard(&ctx)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(Json(DashboardResponse::from(view)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CreateUserRequest;
    use crate::test::utils::setup_test_app_data;
    use crate::types::internal::Role;

    async fn setup() -> (Arc<AppData>, AuthApi) {
        let app_data = setup_test_app_data().await;
        app_data
            .providers
            .user_provider
            .create_user(CreateUserRequest {
                username: "hod1".to_string(),
                password: "hod-pass".to_string(),
                role: Role::Hod,
                college_name: Some("X".to_string()),
                branch_name: Some("CS".to_string()),
            })
            .await
            .expect("Failed to create test user");
        let api = AuthApi::new(app_data.clone());
        (app_data, api)
    }

    fn login_body(username: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn with_session_cookie(token: &str) -> Request {
        Request::builder()
            .header("Cookie", format!("nodue_session={}", token))
            .finish()
    }

    async fn login_token(api: &AuthApi) -> String {
        let req = Request::builder().finish();
        match api.login(&req, login_body("hod1", "hod-pass")).await {
            Ok(LoginApiResponse::Ok(json, _)) => json.0.session_token,
            Err(e) => panic!("login failed: {}", e),
        }
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie_and_points_to_dashboard() {
        let (_app_data, api) = setup().await;
        let req = Request::builder().finish();

        let LoginApiResponse::Ok(json, cookie) = api
            .login(&req, login_body("hod1", "hod-pass"))
            .await
            .expect("login should succeed");

        assert_eq!(json.0.username, "hod1");
        assert_eq!(json.0.role, "HOD");
        assert_eq!(json.0.redirect_to, DASHBOARD_PATH);
        assert!(cookie.starts_with(&format!("nodue_session={}", json.0.session_token)));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_401() {
        let (_app_data, api) = setup().await;
        let req = Request::builder().finish();

        let result = api.login(&req, login_body("hod1", "nope")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_login_with_blank_username_returns_400() {
        let (_app_data, api) = setup().await;
        let req = Request::builder().finish();

        let result = api.login(&req, login_body("  ", "hod-pass")).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials(_))));
    }

    #[tokio::test]
    async fn test_dashboard_with_session_cookie() {
        let (_app_data, api) = setup().await;
        let token = login_token(&api).await;

        let dashboard = api
            .dashboard(&with_session_cookie(&token))
            .await
            .expect("dashboard should load");

        assert_eq!(dashboard.0.principal.username, "hod1");
        let queue = dashboard.0.queue.expect("HOD dashboard shows a queue");
        assert_eq!(queue.stage, "hod");
        assert_eq!(queue.waiting, 0);
    }

    #[tokio::test]
    async fn test_dashboard_accepts_bearer_token() {
        let (_app_data, api) = setup().await;
        let token = login_token(&api).await;
        let req = Request::builder()
            .header("Authorization", format!("Bearer {}", token))
            .finish();

        assert!(api.dashboard(&req).await.is_ok());
    }

    #[tokio::test]
    async fn test_dashboard_without_session_redirects_to_login() {
        let (_app_data, api) = setup().await;
        let req = Request::builder().finish();

        let err = api.dashboard(&req).await.unwrap_err();
        assert!(matches!(err, PortalError::LoginRequired(_, _)));
        assert_eq!(err.location(), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn test_logout_ends_session_and_clears_cookie() {
        let (_app_data, api) = setup().await;
        let token = login_token(&api).await;

        let LogoutApiResponse::Ok(json, cookie) = api
            .logout(&with_session_cookie(&token))
            .await
            .expect("logout should succeed");
        assert_eq!(json.0.redirect_to, LOGIN_PATH);
        assert!(cookie.contains("Max-Age=0"));

        let err = api.dashboard(&with_session_cookie(&token)).await.unwrap_err();
        assert!(matches!(err, PortalError::LoginRequired(_, _)));
    }

    #[tokio::test]
    async fn test_logout_without_session_redirects_to_login() {
        let (_app_data, api) = setup().await;
        let req = Request::builder().finish();

        assert!(matches!(
            api.logout(&req).await,
            Err(PortalError::LoginRequired(_, _))
        ));
    }
}
