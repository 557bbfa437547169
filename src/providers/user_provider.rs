use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::errors::internal::validation::{normalize_text, require_text};
use crate::providers::CryptoProvider;
use crate::stores::{NewUser, UserStore};
use crate::types::db::user;
use crate::types::internal::Role;

pub const USERNAME_MAX_LENGTH: usize = 20;
pub const SCOPE_FIELD_MAX_LENGTH: usize = 50;

/// Account details as supplied by an operator
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub college_name: Option<String>,
    pub branch_name: Option<String>,
}

/// Creates user accounts (administrative seeding)
pub struct UserProvider {
    user_store: Arc<UserStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl UserProvider {
    pub fn new(user_store: Arc<UserStore>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            user_store,
            crypto_provider,
        }
    }

    /// Validate, hash the password and store a new user
    ///
    /// Username and scope fields are trimmed; blank college or branch values
    /// are stored as absent.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(InternalError)` - Validation failure, duplicate username or storage error
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<user::Model, InternalError> {
        let username = require_text("username", Some(&request.username), USERNAME_MAX_LENGTH)?;
        if request.password.is_empty() {
            return Err(ValidationError::missing("password").into());
        }
        let college_name = normalize_text("college_name", request.college_name.as_deref(), SCOPE_FIELD_MAX_LENGTH)?;
        let branch_name = normalize_text("branch_name", request.branch_name.as_deref(), SCOPE_FIELD_MAX_LENGTH)?;

        let password_hash = self.crypto_provider.hash_password(&request.password).await?;

        let user = self
            .user_store
            .create_user(NewUser {
                username,
                password_hash,
                role: request.role,
                college_name,
                branch_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::CredentialError;
    use crate::test::utils::setup_test_db;

    fn provider(db: sea_orm::DatabaseConnection) -> UserProvider {
        UserProvider::new(Arc::new(UserStore::new(db)), Arc::new(CryptoProvider::new()))
    }

    fn request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: "pass-word".to_string(),
            role: Role::Student,
            college_name: Some(" X ".to_string()),
            branch_name: Some("CS".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_trims_scope() {
        let provider = provider(setup_test_db().await);

        let user = provider.create_user(request(" asha ")).await.unwrap();

        assert_eq!(user.username, "asha");
        assert_eq!(user.college_name.as_deref(), Some("X"));
        assert_ne!(user.password_hash, "pass-word");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_blank_scope_is_stored_as_absent() {
        let provider = provider(setup_test_db().await);
        let mut req = request("admin");
        req.role = Role::Admin;
        req.college_name = Some("  ".to_string());
        req.branch_name = None;

        let user = provider.create_user(req).await.unwrap();
        assert_eq!(user.college_name, None);
        assert_eq!(user.branch_name, None);
    }

    #[tokio::test]
    async fn test_username_length_is_limited() {
        let provider = provider(setup_test_db().await);
        let err = provider
            .create_user(request("a-username-that-is-far-too-long"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::FieldTooLong { max: 20, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_password_is_rejected() {
        let provider = provider(setup_test_db().await);
        let mut req = request("asha");
        req.password = String::new();

        let err = provider.create_user(req).await.unwrap_err();
        assert!(matches!(err, InternalError::Validation(ValidationError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let provider = provider(setup_test_db().await);
        provider.create_user(request("asha")).await.unwrap();

        let err = provider.create_user(request("asha")).await.unwrap_err();
        assert!(matches!(err, InternalError::Credential(CredentialError::DuplicateUsername(_))));
    }
}
