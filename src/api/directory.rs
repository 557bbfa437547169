use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::DirectoryCoordinator;
use crate::errors::PortalError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::directory::{
    CreateDirectoryEntryApiResponse, CreateDirectoryEntryRequest, DirectoryEntryResponse,
    DirectoryLookupResponse,
};

/// Faculty/staff directory endpoints
pub struct DirectoryApi {
    directory_coordinator: DirectoryCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl DirectoryApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            directory_coordinator: DirectoryCoordinator::new(app_data.clone()),
            authentication_provider: Arc::clone(&app_data.providers.authentication_provider),
        }
    }
}

#[derive(Tags)]
enum DirectoryTags {
    /// Faculty and staff names per college/branch
    Directory,
}

#[OpenApi]
impl DirectoryApi {
    /// Add a faculty/staff entry for the admin's own college and branch
    #[oai(path = "/admin/directory", method = "post", tag = "DirectoryTags::Directory")]
    async fn create_entry(
        &self,
        req: &Request,
        body: Json<CreateDirectoryEntryRequest>,
    ) -> Result<CreateDirectoryEntryApiResponse, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let entry = self
            .directory_coordinator
            .add_entry(&ctx, body.faculty_name.as_deref(), body.staff_name.as_deref())
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(CreateDirectoryEntryApiResponse::Created(Json(
            DirectoryEntryResponse::from(entry),
        )))
    }

    /// Faculty and staff names for the caller's college and branch
    ///
    /// Returns placeholder names when no entry exists.
    #[oai(path = "/directory", method = "get", tag = "DirectoryTags::Directory")]
    async fn lookup(&self, req: &Request) -> Result<Json<DirectoryLookupResponse>, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let listing = self
            .directory_coordinator
            .lookup(&ctx)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(Json(DirectoryLookupResponse::from(listing)))
    }
}
