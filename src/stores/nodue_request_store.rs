use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::nodue_request::{self, Column, Entity as NodueRequest};
use crate::types::internal::{ApprovalFields, ApprovalState, ScopeKey};

/// NodueRequestStore persists clearance requests
///
/// Rows are never deleted. Approval columns only change through
/// [`NodueRequestStore::apply_transition`], which is guarded by the prior state.
pub struct NodueRequestStore {
    db: DatabaseConnection,
}

/// Row filter matching exactly the requests in `state`
///
/// Mirrors `ApprovalFields::state`, so rows with an inconsistent column
/// combination match no state and never appear in a queue.
fn state_condition(state: ApprovalState) -> Condition {
    let (is_approved, hod, library, staff) = match state {
        ApprovalState::Pending => (false, Some(false), false, false),
        ApprovalState::HodApproved => (true, None, false, false),
        ApprovalState::LibraryCleared => (true, None, true, false),
        ApprovalState::FullyCleared => (true, None, true, true),
    };

    let present = |column: Column, set: bool| {
        if set {
            column.is_not_null()
        } else {
            column.is_null()
        }
    };

    let mut condition = Condition::all()
        .add(Column::IsApproved.eq(is_approved))
        .add(present(Column::LibraryComment, library))
        .add(present(Column::StaffComment, staff));
    if let Some(hod) = hod {
        condition = condition.add(present(Column::HodComment, hod));
    }
    condition
}

impl NodueRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a Pending request
    ///
    /// # Arguments
    /// * `student_id` - The submitting student's user id
    /// * `scope` - The student's college/branch at submission time, stored as-is
    pub async fn create_request(
        &self,
        student_id: &str,
        scope: &ScopeKey,
    ) -> Result<nodue_request::Model, InternalError> {
        let now = Utc::now().timestamp();

        nodue_request::ActiveModel {
            student_id: Set(student_id.to_string()),
            is_approved: Set(false),
            hod_comment: Set(None),
            library_comment: Set(None),
            staff_comment: Set(None),
            college_name: Set(scope.college_name.clone()),
            branch_name: Set(scope.branch_name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_request", e))
    }

    pub async fn get_request(&self, request_id: i32) -> Result<Option<nodue_request::Model>, InternalError> {
        NodueRequest::find_by_id(request_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_request", e))
    }

    /// All requests a student has submitted, oldest first
    pub async fn list_for_student(&self, student_id: &str) -> Result<Vec<nodue_request::Model>, InternalError> {
        NodueRequest::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests_for_student", e))
    }

    /// Requests in `scope` currently in `state`, in insertion order
    ///
    /// Scope matching is exact string equality on both columns.
    pub async fn list_in_state(
        &self,
        scope: &ScopeKey,
        state: ApprovalState,
    ) -> Result<Vec<nodue_request::Model>, InternalError> {
        NodueRequest::find()
            .filter(Column::CollegeName.eq(scope.college_name.as_str()))
            .filter(Column::BranchName.eq(scope.branch_name.as_str()))
            .filter(state_condition(state))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests_in_state", e))
    }

    /// Write new approval columns if the row is still in `expected`
    ///
    /// Runs as a single conditional UPDATE, so two actors racing on the same
    /// request cannot both succeed.
    ///
    /// # Returns
    /// * `Ok(true)` - The row was updated
    /// * `Ok(false)` - The row is gone or no longer in `expected`
    pub async fn apply_transition(
        &self,
        request_id: i32,
        expected: ApprovalState,
        next: &ApprovalFields,
    ) -> Result<bool, InternalError> {
        let result = NodueRequest::update_many()
            .col_expr(Column::IsApproved, Expr::value(next.is_approved))
            .col_expr(Column::HodComment, Expr::value(next.hod_comment.clone()))
            .col_expr(Column::LibraryComment, Expr::value(next.library_comment.clone()))
            .col_expr(Column::StaffComment, Expr::value(next.staff_comment.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .filter(Column::Id.eq(request_id))
            .filter(state_condition(expected))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("apply_transition", e))?;

        Ok(result.rows_affected == 1)
    }
}
