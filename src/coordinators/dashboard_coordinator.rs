use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, ApprovalProvider};
use crate::types::internal::{Action, Principal, RequestContext, Role, Stage};

/// Role-specific landing view
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub principal: Principal,
    pub actions: Vec<Action>,
    /// Stage this role works, with the number of requests waiting on it
    pub queue: Option<(Stage, usize)>,
    /// Requests the student has submitted
    pub submitted_requests: Option<usize>,
}

pub struct DashboardCoordinator {
    approval_provider: Arc<ApprovalProvider>,
}

impl DashboardCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            approval_provider: Arc::clone(&app_data.providers.approval_provider),
        }
    }

    /// Build the caller's dashboard
    ///
    /// Queue sizes are only reported when the principal has a complete scope;
    /// otherwise the dashboard still renders without them.
    pub async fn dashboard(&self, ctx: &RequestContext) -> Result<DashboardView, InternalError> {
        let principal = AccessPolicy::authorize(ctx, Action::ViewDashboard)?;

        let queue = match (AccessPolicy::stage_for(principal.role), principal.scope()) {
            (Some(stage), Some(_)) => {
                let waiting = self.approval_provider.queue(principal, stage).await?;
                Some((stage, waiting.len()))
            }
            _ => None,
        };

        let submitted_requests = if principal.role == Role::Student {
            Some(self.approval_provider.own_requests(principal).await?.len())
        } else {
            None
        };

        Ok(DashboardView {
            principal: principal.clone(),
            actions: AccessPolicy::permitted_actions(principal.role),
            queue,
            submitted_requests,
        })
    }
}
