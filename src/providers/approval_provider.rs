use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::ApprovalError;
use crate::errors::internal::validation::normalize_text;
use crate::stores::NodueRequestStore;
use crate::types::db::nodue_request;
use crate::types::internal::{Principal, Stage};

/// Longest comment a stage may attach
pub const COMMENT_MAX_LENGTH: usize = 200;

/// Runs the no-due approval workflow against the store
///
/// Callers authorize first; this provider enforces scope and state.
pub struct ApprovalProvider {
    request_store: Arc<NodueRequestStore>,
}

impl ApprovalProvider {
    pub fn new(request_store: Arc<NodueRequestStore>) -> Self {
        Self { request_store }
    }

    /// Create a Pending request for `student`
    ///
    /// The student's college and branch are copied onto the request and never
    /// re-read, so later changes to the student do not move the request.
    pub async fn submit(&self, student: &Principal) -> Result<nodue_request::Model, InternalError> {
        let scope = student.require_scope()?;
        let request = self.request_store.create_request(&student.user_id, &scope).await?;

        tracing::info!(request_id = request.id, student_id = %student.user_id, scope = %scope, "No-due request submitted");
        Ok(request)
    }

    pub async fn own_requests(&self, student: &Principal) -> Result<Vec<nodue_request::Model>, InternalError> {
        self.request_store.list_for_student(&student.user_id).await
    }

    /// Requests waiting on `stage` in the actor's scope, oldest first
    pub async fn queue(&self, actor: &Principal, stage: Stage) -> Result<Vec<nodue_request::Model>, InternalError> {
        let scope = actor.require_scope()?;
        self.request_store.list_in_state(&scope, stage.consumes()).await
    }

    /// Perform `stage`'s action on one request
    ///
    /// # Arguments
    /// * `actor` - Principal performing the stage (already authorized for it)
    /// * `stage` - The stage being performed
    /// * `request_id` - Target request
    /// * `comment` - Free text; blank is treated as absent
    ///
    /// # Returns
    /// * `Ok(nodue_request::Model)` - The request after the transition
    /// * `Err(InternalError::Approval)` - Not found, out of scope, wrong state or missing comment
    pub async fn act(
        &self,
        actor: &Principal,
        stage: Stage,
        request_id: i32,
        comment: Option<&str>,
    ) -> Result<nodue_request::Model, InternalError> {
        let scope = actor.require_scope()?;
        let comment = normalize_text("comment", comment, COMMENT_MAX_LENGTH)?;

        // Step 1: Load and scope-check
        let request = self
            .request_store
            .get_request(request_id)
            .await?
            .ok_or(ApprovalError::RequestNotFound { request_id })?;
        if request.scope() != scope {
            return Err(ApprovalError::OutOfScope { request_id }.into());
        }

        // Step 2: Validate the transition on the loaded snapshot
        let fields = request.approval_fields();
        let current = fields.state()?;
        let next = fields.apply(stage, comment)?;

        // Step 3: Write, conditioned on the state we validated against
        if !self.request_store.apply_transition(request_id, current, &next).await? {
            let actual = self
                .request_store
                .get_request(request_id)
                .await?
                .ok_or(ApprovalError::RequestNotFound { request_id })?
                .approval_fields()
                .state()?;
            tracing::info!(request_id, stage = %stage, actual = %actual, "Transition lost a concurrent update");
            return Err(ApprovalError::WrongState {
                stage,
                expected: stage.consumes(),
                actual,
            }
            .into());
        }

        let updated = self
            .request_store
            .get_request(request_id)
            .await?
            .ok_or(ApprovalError::RequestNotFound { request_id })?;

        tracing::info!(
            request_id,
            stage = %stage,
            actor_id = %actor.user_id,
            state = %stage.produces(),
            "No-due request advanced"
        );
        Ok(updated)
    }
}
