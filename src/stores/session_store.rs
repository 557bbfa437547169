use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::session::{self, Entity as Session};
use crate::types::db::user;

/// SessionStore persists login sessions keyed by the hash of their token
///
/// The raw token never reaches the database.
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a new session
    ///
    /// # Arguments
    /// * `token_hash` - HMAC-SHA256 of the session token
    /// * `user_id` - Owner of the session
    /// * `created_at` - Unix timestamp of login
    /// * `expires_at` - Unix timestamp after which the session is ignored
    pub async fn create_session(
        &self,
        token_hash: String,
        user_id: String,
        created_at: i64,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        session::ActiveModel {
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_session", e))?;

        Ok(())
    }

    /// Look up an unexpired session together with its user
    ///
    /// # Returns
    /// * `Ok(Some(user))` - Session exists and `expires_at > now`
    /// * `Ok(None)` - Unknown or expired token
    pub async fn find_active_session(
        &self,
        token_hash: &str,
        now: i64,
    ) -> Result<Option<user::Model>, InternalError> {
        let found = Session::find_by_id(token_hash.to_string())
            .filter(session::Column::ExpiresAt.gt(now))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_active_session", e))?;

        Ok(found.and_then(|(_, user)| user))
    }

    /// Remove a session
    ///
    /// # Returns
    /// * `Ok(true)` - A session was deleted
    /// * `Ok(false)` - No session had that hash
    pub async fn delete_session(&self, token_hash: &str) -> Result<bool, InternalError> {
        let result = Session::delete_by_id(token_hash.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_session", e))?;

        Ok(result.rows_affected > 0)
    }

    /// Delete every session that expired at or before `now`
    pub async fn purge_expired(&self, now: i64) -> Result<u64, InternalError> {
        let result = Session::delete_many()
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("purge_expired_sessions", e))?;

        Ok(result.rows_affected)
    }
}
