use crate::errors::internal::AccessError;
use crate::types::internal::{Action, Principal, RequestContext, Role, Stage};

/// Role-based access decisions
///
/// A fixed table from (role, action) to allow/deny. Scope (college/branch)
/// is not part of this decision; providers filter by scope after access is
/// granted.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Whether `role` may perform `action`
    pub fn permits(role: Role, action: Action) -> bool {
        match action {
            Action::ViewDashboard | Action::Logout | Action::LookupDirectory => true,
            Action::SubmitRequest | Action::ViewOwnRequests => role == Role::Student,
            Action::ManageDirectory => role == Role::Admin,
            Action::ActOnStage(stage) => stage.role() == role,
        }
    }

    pub fn is_authenticated(ctx: &RequestContext) -> bool {
        ctx.principal.is_some()
    }

    /// Check the caller in `ctx` may perform `action`
    ///
    /// # Returns
    /// * `Ok(&Principal)` - The authenticated, permitted principal
    /// * `Err(AccessError::Unauthenticated)` - No principal in the context
    /// * `Err(AccessError::Denied)` - The principal's role lacks the permission
    pub fn authorize(ctx: &RequestContext, action: Action) -> Result<&Principal, AccessError> {
        let principal = ctx.principal.as_ref().ok_or(AccessError::Unauthenticated)?;

        if !Self::permits(principal.role, action) {
            tracing::info!(
                request_id = %ctx.request_id,
                user_id = %principal.user_id,
                role = %principal.role,
                action = %action,
                "Access denied"
            );
            return Err(AccessError::Denied {
                role: principal.role,
                action,
            });
        }

        Ok(principal)
    }

    /// Every action `role` may perform, in dashboard order
    pub fn permitted_actions(role: Role) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| Self::permits(role, *action))
            .collect()
    }

    /// The approval stage a role works, if any
    pub fn stage_for(role: Role) -> Option<Stage> {
        Stage::for_role(role)
    }
}
