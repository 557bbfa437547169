use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, ApprovalProvider};
use crate::types::db::nodue_request;
use crate::types::internal::{Action, RequestContext, Stage};

/// Orchestrates submission, queues and stage actions
pub struct NodueCoordinator {
    approval_provider: Arc<ApprovalProvider>,
}

impl NodueCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            approval_provider: Arc::clone(&app_data.providers.approval_provider),
        }
    }

    /// Student submits a new request for their own college/branch
    pub async fn submit(&self, ctx: &RequestContext) -> Result<nodue_request::Model, InternalError> {
        let student = AccessPolicy::authorize(ctx, Action::SubmitRequest)?;
        self.approval_provider.submit(student).await
    }

    /// Student lists their own requests
    pub async fn own_requests(&self, ctx: &RequestContext) -> Result<Vec<nodue_request::Model>, InternalError> {
        let student = AccessPolicy::authorize(ctx, Action::ViewOwnRequests)?;
        self.approval_provider.own_requests(student).await
    }

    /// Requests waiting on `stage` in the caller's scope
    pub async fn queue(&self, ctx: &RequestContext, stage: Stage) -> Result<Vec<nodue_request::Model>, InternalError> {
        let actor = AccessPolicy::authorize(ctx, Action::ActOnStage(stage))?;
        self.approval_provider.queue(actor, stage).await
    }

    /// Perform `stage`'s action on a request
    ///
    /// # Arguments
    /// * `ctx` - Request context carrying the acting principal
    /// * `stage` - Stage being performed; the caller's role must own it
    /// * `request_id` - Target request
    /// * `comment` - Optional for HOD, required for Library and Staff
    pub async fn act(
        &self,
        ctx: &RequestContext,
        stage: Stage,
        request_id: i32,
        comment: Option<&str>,
    ) -> Result<nodue_request::Model, InternalError> {
        // Step 1: Role check
        let actor = AccessPolicy::authorize(ctx, Action::ActOnStage(stage))?;

        // Step 2: Scope, state and comment checks plus the guarded write
        self.approval_provider.act(actor, stage, request_id, comment).await
    }
}
