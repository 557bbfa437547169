// Common test utilities for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use nodue_backend::AppData;
use nodue_backend::config::{BootstrapSettings, DatabaseConnections, EnvironmentProvider};
use nodue_backend::coordinators::LoginCoordinator;
use nodue_backend::providers::CreateUserRequest;
use nodue_backend::types::internal::{RequestContext, Role};

pub const TEST_SESSION_SECRET: &str = "integration-session-secret-32-chars-min";

/// Environment provider backed by a map, so tests never touch process env
#[derive(Default, Clone)]
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// In-memory database and a valid session secret
    pub fn standard() -> Self {
        Self::new()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_var("SESSION_SECRET", TEST_SESSION_SECRET)
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Builds AppData the way main does, over a migrated in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let env = Arc::new(TestEnvironment::standard());
    let settings = BootstrapSettings::from_env_provider(env.clone())
        .expect("Test settings should be valid");

    let connections = DatabaseConnections::init(&settings)
        .await
        .expect("Failed to connect to test database");
    connections.migrate().await.expect("Failed to run migrations");

    Arc::new(AppData::init(connections, env.as_ref(), &settings).expect("Failed to build AppData"))
}

/// Creates an account and logs it in, returning the session-backed context
pub async fn login_as(
    app_data: &Arc<AppData>,
    username: &str,
    role: Role,
    scope: Option<(&str, &str)>,
) -> RequestContext {
    let password = format!("{}-password", username);
    app_data
        .providers
        .user_provider
        .create_user(CreateUserRequest {
            username: username.to_string(),
            password: password.clone(),
            role,
            college_name: scope.map(|(college, _)| college.to_string()),
            branch_name: scope.map(|(_, branch)| branch.to_string()),
        })
        .await
        .expect("Failed to create test user");

    relogin(app_data, username, &password).await
}

/// Logs an existing account in again, picking up its current fields
pub async fn relogin(app_data: &Arc<AppData>, username: &str, password: &str) -> RequestContext {
    let (session, _) = LoginCoordinator::new(app_data.clone())
        .login(&RequestContext::anonymous(), username, password)
        .await
        .expect("Login should succeed");

    let principal = app_data
        .providers
        .authentication_provider
        .resolve_session(&session.token)
        .await
        .expect("Session lookup should succeed")
        .expect("Fresh session should resolve");

    let mut ctx = RequestContext::anonymous().with_principal(principal);
    ctx.session_token = Some(session.token);
    ctx
}
