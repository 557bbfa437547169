use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::faculty_staff::{self, Column, Entity as FacultyStaff};
use crate::types::internal::ScopeKey;

/// FacultyStaffStore persists directory entries
///
/// Entries are insert-only. Nothing stops several entries for one scope, so
/// reads pick the oldest.
pub struct FacultyStaffStore {
    db: DatabaseConnection,
}

impl FacultyStaffStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_entry(
        &self,
        scope: &ScopeKey,
        faculty_name: String,
        staff_name: String,
    ) -> Result<faculty_staff::Model, InternalError> {
        faculty_staff::ActiveModel {
            college_name: Set(scope.college_name.clone()),
            branch_name: Set(scope.branch_name.clone()),
            faculty_name: Set(faculty_name),
            staff_name: Set(staff_name),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_directory_entry", e))
    }

    /// Oldest entry for `scope`, by id
    pub async fn first_for_scope(&self, scope: &ScopeKey) -> Result<Option<faculty_staff::Model>, InternalError> {
        FacultyStaff::find()
            .filter(Column::CollegeName.eq(scope.college_name.as_str()))
            .filter(Column::BranchName.eq(scope.branch_name.as_str()))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("first_directory_entry", e))
    }

    pub async fn count_for_scope(&self, scope: &ScopeKey) -> Result<u64, InternalError> {
        FacultyStaff::find()
            .filter(Column::CollegeName.eq(scope.college_name.as_str()))
            .filter(Column::BranchName.eq(scope.branch_name.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_directory_entries", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_missing_scope_has_no_entry() {
        let store = FacultyStaffStore::new(setup_test_db().await);
        let scope = ScopeKey::new("X", "CS");

        assert!(store.first_for_scope(&scope).await.unwrap().is_none());
        assert_eq!(store.count_for_scope(&scope).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_first_entry_wins_when_several_exist() {
        let store = FacultyStaffStore::new(setup_test_db().await);
        let scope = ScopeKey::new("X", "CS");

        store
            .create_entry(&scope, "Dr. Rao".to_string(), "Mr. Iyer".to_string())
            .await
            .unwrap();
        store
            .create_entry(&scope, "Dr. Menon".to_string(), "Ms. Das".to_string())
            .await
            .unwrap();

        let first = store.first_for_scope(&scope).await.unwrap().unwrap();
        assert_eq!(first.faculty_name, "Dr. Rao");
        assert_eq!(first.staff_name, "Mr. Iyer");
        assert_eq!(store.count_for_scope(&scope).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_entries_are_scoped() {
        let store = FacultyStaffStore::new(setup_test_db().await);
        store
            .create_entry(&ScopeKey::new("X", "CS"), "A".to_string(), "B".to_string())
            .await
            .unwrap();

        assert!(store.first_for_scope(&ScopeKey::new("X", "ECE")).await.unwrap().is_none());
        assert!(store.first_for_scope(&ScopeKey::new("Y", "CS")).await.unwrap().is_none());
    }
}
