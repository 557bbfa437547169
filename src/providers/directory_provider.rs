use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::validation::require_text;
use crate::stores::FacultyStaffStore;
use crate::types::db::faculty_staff;
use crate::types::internal::{Principal, ScopeKey};

pub const FACULTY_NAME_NOT_AVAILABLE: &str = "Faculty Name Not Available";
pub const STAFF_NAME_NOT_AVAILABLE: &str = "Staff Name Not Available";

/// Longest faculty or staff name accepted
pub const NAME_MAX_LENGTH: usize = 100;

/// Result of a directory lookup; never an error for a missing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub scope: ScopeKey,
    pub faculty_name: String,
    pub staff_name: String,
    /// False when the sentinel names were substituted
    pub found: bool,
}

impl DirectoryListing {
    fn not_available(scope: ScopeKey) -> Self {
        Self {
            scope,
            faculty_name: FACULTY_NAME_NOT_AVAILABLE.to_string(),
            staff_name: STAFF_NAME_NOT_AVAILABLE.to_string(),
            found: false,
        }
    }
}

/// Faculty/staff directory per (college, branch)
pub struct DirectoryProvider {
    store: Arc<FacultyStaffStore>,
}

impl DirectoryProvider {
    pub fn new(store: Arc<FacultyStaffStore>) -> Self {
        Self { store }
    }

    /// Add an entry for the admin's own college/branch
    pub async fn add_entry(
        &self,
        admin: &Principal,
        faculty_name: Option<&str>,
        staff_name: Option<&str>,
    ) -> Result<faculty_staff::Model, InternalError> {
        let scope = admin.require_scope()?;
        let faculty_name = require_text("faculty_name", faculty_name, NAME_MAX_LENGTH)?;
        let staff_name = require_text("staff_name", staff_name, NAME_MAX_LENGTH)?;

        let entry = self.store.create_entry(&scope, faculty_name, staff_name).await?;

        tracing::info!(entry_id = entry.id, scope = %scope, admin_id = %admin.user_id, "Directory entry created");
        Ok(entry)
    }

    /// Names for `scope`, or the sentinel pair when there is no entry
    ///
    /// With several entries the oldest is returned.
    pub async fn lookup(&self, scope: &ScopeKey) -> Result<DirectoryListing, InternalError> {
        let Some(entry) = self.store.first_for_scope(scope).await? else {
            tracing::debug!(scope = %scope, "No directory entry, using placeholders");
            return Ok(DirectoryListing::not_available(scope.clone()));
        };

        let count = self.store.count_for_scope(scope).await?;
        if count > 1 {
            tracing::warn!(scope = %scope, count, entry_id = entry.id, "Several directory entries, using the oldest");
        }

        Ok(DirectoryListing {
            scope: scope.clone(),
            faculty_name: entry.faculty_name,
            staff_name: entry.staff_name,
            found: true,
        })
    }

    /// Lookup for the caller's own scope
    ///
    /// A principal without a complete scope gets the sentinel pair too.
    pub async fn lookup_for(&self, principal: &Principal) -> Result<DirectoryListing, InternalError> {
        match principal.scope() {
            Some(scope) => self.lookup(&scope).await,
            None => Ok(DirectoryListing::not_available(ScopeKey::new(
                principal.college_name.clone().unwrap_or_default(),
                principal.branch_name.clone().unwrap_or_default(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ValidationError;
    use crate::test::utils::setup_test_db;
    use crate::types::internal::Role;

    fn admin(scope: Option<(&str, &str)>) -> Principal {
        Principal {
            user_id: "admin-id".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            college_name: scope.map(|(c, _)| c.to_string()),
            branch_name: scope.map(|(_, b)| b.to_string()),
        }
    }

    async fn provider() -> DirectoryProvider {
        DirectoryProvider::new(Arc::new(FacultyStaffStore::new(setup_test_db().await)))
    }

    #[tokio::test]
    async fn test_miss_returns_sentinel_pair() {
        let provider = provider().await;
        let listing = provider.lookup(&ScopeKey::new("X", "CS")).await.unwrap();

        assert!(!listing.found);
        assert_eq!(listing.faculty_name, "Faculty Name Not Available");
        assert_eq!(listing.staff_name, "Staff Name Not Available");
    }

    #[tokio::test]
    async fn test_add_then_lookup() {
        let provider = provider().await;
        let admin = admin(Some(("X", "CS")));
        provider.add_entry(&admin, Some(" Dr. Rao "), Some("Mr. Iyer")).await.unwrap();

        let listing = provider.lookup_for(&admin).await.unwrap();
        assert!(listing.found);
        assert_eq!(listing.faculty_name, "Dr. Rao");
        assert_eq!(listing.staff_name, "Mr. Iyer");
        assert_eq!(listing.scope, ScopeKey::new("X", "CS"));
    }

    #[tokio::test]
    async fn test_oldest_entry_wins() {
        let provider = provider().await;
        let admin = admin(Some(("X", "CS")));
        provider.add_entry(&admin, Some("First"), Some("One")).await.unwrap();
        provider.add_entry(&admin, Some("Second"), Some("Two")).await.unwrap();

        let listing = provider.lookup_for(&admin).await.unwrap();
        assert_eq!(listing.faculty_name, "First");
    }

    #[tokio::test]
    async fn test_missing_names_are_validation_errors() {
        let provider = provider().await;
        let err = provider
            .add_entry(&admin(Some(("X", "CS"))), Some("Dr. Rao"), Some(""))
            .await
            .unwrap_err();
        assert!(matches!(err, InternalError::Validation(ValidationError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_admin_without_scope_cannot_add() {
        let provider = provider().await;
        let err = provider.add_entry(&admin(None), Some("A"), Some("B")).await.unwrap_err();
        assert!(matches!(err, InternalError::Validation(ValidationError::IncompleteScope { .. })));
    }

    #[tokio::test]
    async fn test_unscoped_lookup_is_sentinel() {
        let provider = provider().await;
        let listing = provider.lookup_for(&admin(None)).await.unwrap();
        assert!(!listing.found);
    }
}
