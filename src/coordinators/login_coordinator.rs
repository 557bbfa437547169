use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::providers::{AccessPolicy, AuthenticationProvider, IssuedSession};
use crate::types::internal::{Action, Principal, RequestContext};

/// Orchestrates login and logout
pub struct LoginCoordinator {
    authentication_provider: Arc<AuthenticationProvider>,
}

impl LoginCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: Arc::clone(&app_data.providers.authentication_provider),
        }
    }

    /// Verify credentials and open a session
    ///
    /// # Arguments
    /// * `ctx` - Request context (may already be authenticated; a new session is issued regardless)
    /// * `username` - Username as typed
    /// * `password` - Password as typed
    ///
    /// # Returns
    /// * `Ok((IssuedSession, Principal))` - Session token and who it belongs to
    /// * `Err(InternalError)` - Missing fields, invalid credentials or storage failure
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<(IssuedSession, Principal), InternalError> {
        // Step 1: Both fields are required
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::missing("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::missing("password").into());
        }

        // Step 2: Verify credentials
        let user = self
            .authentication_provider
            .verify_credential(username, password)
            .await?;

        // Step 3: Open a session
        let session = self.authentication_provider.open_session(&user.id).await?;
        let principal = Principal::try_from(user)?;

        // Step 4: Drop sessions that have expired since the last login
        let purged = self.authentication_provider.purge_expired_sessions().await?;
        if purged > 0 {
            tracing::debug!(request_id = %ctx.request_id, purged, "Purged expired sessions");
        }

        tracing::info!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            user_id = %principal.user_id,
            role = %principal.role,
            "Login succeeded"
        );
        Ok((session, principal))
    }

    /// End the caller's session
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), InternalError> {
        let principal = AccessPolicy::authorize(ctx, Action::Logout)?;

        if let Some(token) = &ctx.session_token {
            self.authentication_provider.close_session(token).await?;
        }

        tracing::info!(request_id = %ctx.request_id, user_id = %principal.user_id, "Logged out");
        Ok(())
    }
}
