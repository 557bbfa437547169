use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, DirectoryListing, DirectoryProvider};
use crate::types::db::faculty_staff;
use crate::types::internal::{Action, RequestContext};

/// Orchestrates directory management and lookup
pub struct DirectoryCoordinator {
    directory_provider: Arc<DirectoryProvider>,
}

impl DirectoryCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            directory_provider: Arc::clone(&app_data.providers.directory_provider),
        }
    }

    /// Admin adds a faculty/staff entry for their own college/branch
    ///
    /// Nothing is written unless the access check passes.
    pub async fn add_entry(
        &self,
        ctx: &RequestContext,
        faculty_name: Option<&str>,
        staff_name: Option<&str>,
    ) -> Result<faculty_staff::Model, InternalError> {
        let admin = AccessPolicy::authorize(ctx, Action::ManageDirectory)?;
        self.directory_provider.add_entry(admin, faculty_name, staff_name).await
    }

    /// Faculty/staff names for the caller's college/branch
    pub async fn lookup(&self, ctx: &RequestContext) -> Result<DirectoryListing, InternalError> {
        let principal = AccessPolicy::authorize(ctx, Action::LookupDirectory)?;
        self.directory_provider.lookup_for(principal).await
    }
}
