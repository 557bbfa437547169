// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::app_data::AppData;
use crate::config::{DatabaseConnections, SecretManager};
use crate::providers::CreateUserRequest;
use crate::types::db::user;
use crate::types::internal::context::request_context::SESSION_COOKIE;
use crate::types::internal::{Principal, RequestContext, Role};

pub const TEST_SESSION_SECRET: &str = "test-session-secret-at-least-32-characters";

/// Creates an in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts a user row directly, bypassing password hashing
///
/// The stored hash is not a valid PHC string, so these users cannot log in.
/// Use `UserProvider::create_user` for login tests.
pub async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
    scope: Option<(&str, &str)>,
) -> user::Model {
    user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(username.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role.as_str().to_string()),
        college_name: Set(scope.map(|(college, _)| college.to_string())),
        branch_name: Set(scope.map(|(_, branch)| branch.to_string())),
        created_at: Set(Utc::now().timestamp()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}

/// Inserts a user and returns an authenticated context for it
pub async fn context_for(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
    scope: Option<(&str, &str)>,
) -> RequestContext {
    let model = insert_user(db, username, role, scope).await;
    let principal = Principal::try_from(model).expect("Test user should convert");
    RequestContext::anonymous().with_principal(principal)
}

/// Builds AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::new(
        DatabaseConnections { db },
        Arc::new(SecretManager::from_session_secret(TEST_SESSION_SECRET)),
        std::time::Duration::from_secs(60 * 60),
    ))
}

/// Creates a loginable user, opens a session for it and returns a request carrying the cookie
pub async fn session_request(
    app_data: &AppData,
    username: &str,
    role: Role,
    scope: (&str, &str),
) -> poem::Request {
    let user = app_data
        .providers
        .user_provider
        .create_user(CreateUserRequest {
            username: username.to_string(),
            password: "password".to_string(),
            role,
            college_name: Some(scope.0.to_string()),
            branch_name: Some(scope.1.to_string()),
        })
        .await
        .expect("Failed to create test user");
    let session = app_data
        .providers
        .authentication_provider
        .open_session(&user.id)
        .await
        .expect("Failed to open session");

    poem::Request::builder()
        .header("Cookie", format!("{}={}", SESSION_COOKIE, session.token))
        .finish()
}
