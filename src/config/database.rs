use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;

/// Database handles owned by the application
pub struct DatabaseConnections {
    pub db: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the configured database
    ///
    /// Does NOT run migrations - call `migrate()` separately.
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let db = Self::connect(bootstrap_settings.database_url()).await?;
        Ok(Self { db })
    }

    /// Connect to an explicit URL, e.g. `sqlite::memory:` in tests
    pub async fn connect(database_url: &str) -> Result<DatabaseConnection, InternalError> {
        let db = Database::connect(database_url)
            .await
            .map_err(|source| DatabaseError::Connect { source })?;

        tracing::debug!("Connected to database: {}", database_url);

        Ok(db)
    }

    /// Run all pending migrations
    ///
    /// # Returns
    /// * `Ok(())` - Schema is up to date
    /// * `Err(InternalError)` - Migration failed
    pub async fn migrate(&self) -> Result<(), InternalError> {
        migrate_database(&self.db).await
    }
}

pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|source| DatabaseError::Migration { source })?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn test_migrate_creates_tables() {
        let connections = DatabaseConnections {
            db: DatabaseConnections::connect("sqlite::memory:").await.unwrap(),
        };
        connections.migrate().await.unwrap();

        for table in ["users", "nodue_requests", "faculty_staff", "sessions"] {
            let row = connections
                .db
                .query_one(Statement::from_string(
                    connections.db.get_database_backend(),
                    format!(
                        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}'",
                        table
                    ),
                ))
                .await
                .unwrap();
            assert!(row.is_some(), "table {} missing", table);
        }
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = DatabaseConnections::connect("sqlite::memory:").await.unwrap();
        migrate_database(&db).await.unwrap();
        migrate_database(&db).await.unwrap();
    }
}
