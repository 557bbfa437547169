use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::Role;

/// Fields needed to create a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub college_name: Option<String>,
    pub branch_name: Option<String>,
}

/// UserStore manages user accounts in the database
///
/// Users are only ever created and read. There is no update or delete path;
/// a user's role is fixed at creation.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a new user to the database
    ///
    /// # Arguments
    /// * `new_user` - Account fields with the password already hashed
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created row, with a fresh UUID
    /// * `Err(InternalError)` - Credential(DuplicateUsername) if the username is taken
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        if self.get_user_by_username(&new_user.username).await?.is_some() {
            return Err(CredentialError::DuplicateUsername(new_user.username).into());
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(new_user.username.clone()),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.as_str().to_string()),
            college_name: Set(new_user.college_name),
            branch_name: Set(new_user.branch_name),
            created_at: Set(Utc::now().timestamp()),
        };

        model.insert(&self.db).await.map_err(|e| {
            // Lost a race with a concurrent insert of the same username
            if e.to_string().contains("UNIQUE") {
                CredentialError::DuplicateUsername(new_user.username).into()
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_username", e))
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").field("db", &"<connection>").finish()
    }
}
