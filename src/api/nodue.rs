use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::NodueCoordinator;
use crate::errors::PortalError;
use crate::providers::AuthenticationProvider;
use crate::types::db::nodue_request;
use crate::types::dto::nodue::{
    NodueQueueResponse, NodueRequestResponse, StageActionRequest, SubmitNodueApiResponse,
};
use crate::types::internal::Stage;

/// Student submission and the three stage queues
pub struct NodueApi {
    nodue_coordinator: NodueCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl NodueApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            nodue_coordinator: NodueCoordinator::new(app_data.clone()),
            authentication_provider: Arc::clone(&app_data.providers.authentication_provider),
        }
    }

    async fn queue(&self, req: &Request, stage: Stage) -> Result<Json<NodueQueueResponse>, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let requests = self
            .nodue_coordinator
            .queue(&ctx, stage)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(Json(NodueQueueResponse {
            stage: stage.to_string(),
            requests: to_responses(requests),
        }))
    }

    async fn act(
        &self,
        req: &Request,
        stage: Stage,
        request_id: i32,
        body: StageActionRequest,
    ) -> Result<Json<NodueRequestResponse>, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let updated = self
            .nodue_coordinator
            .act(&ctx, stage, request_id, body.comment.as_deref())
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(Json(NodueRequestResponse::from(updated)))
    }
}

fn to_responses(requests: Vec<nodue_request::Model>) -> Vec<NodueRequestResponse> {
    requests.into_iter().map(NodueRequestResponse::from).collect()
}

#[derive(Tags)]
enum NodueTags {
    /// Student no-due requests
    Student,
    /// HOD approval queue
    Hod,
    /// Library clearance queue
    Library,
    /// Staff clearance queue
    Staff,
}

#[OpenApi]
impl NodueApi {
    /// Submit a no-due request for the student's own college and branch
    #[oai(path = "/nodue/requests", method = "post", tag = "NodueTags::Student")]
    async fn submit(&self, req: &Request) -> Result<SubmitNodueApiResponse, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let created = self
            .nodue_coordinator
            .submit(&ctx)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(SubmitNodueApiResponse::Created(Json(NodueRequestResponse::from(created))))
    }

    /// The student's own requests with their current state
    #[oai(path = "/nodue/requests", method = "get", tag = "NodueTags::Student")]
    async fn own_requests(&self, req: &Request) -> Result<Json<Vec<NodueRequestResponse>>, PortalError> {
        let ctx = helpers::build_request_context(req, &self.authentication_provider)
            .await
            .map_err(PortalError::from_internal_error)?;

        let requests = self
            .nodue_coordinator
            .own_requests(&ctx)
            .await
            .map_err(PortalError::from_internal_error)?;

        Ok(Json(to_responses(requests)))
    }

    /// Pending requests in the HOD's college and branch
    #[oai(path = "/hod/requests", method = "get", tag = "NodueTags::Hod")]
    async fn hod_queue(&self, req: &Request) -> Result<Json<NodueQueueResponse>, PortalError> {
        self.queue(req, Stage::Hod).await
    }

    /// Approve a pending request, optionally with a comment
    #[oai(path = "/hod/requests/:id/approve", method = "post", tag = "NodueTags::Hod")]
    async fn hod_approve(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<StageActionRequest>,
    ) -> Result<Json<NodueRequestResponse>, PortalError> {
        self.act(req, Stage::Hod, id.0, body.0).await
    }

    /// HOD-approved requests in the library's college and branch
    #[oai(path = "/library/requests", method = "get", tag = "NodueTags::Library")]
    async fn library_queue(&self, req: &Request) -> Result<Json<NodueQueueResponse>, PortalError> {
        self.queue(req, Stage::Library).await
    }

    /// Clear a request at the library stage; the comment is required
    #[oai(path = "/library/requests/:id/comment", method = "post", tag = "NodueTags::Library")]
    async fn library_comment(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<StageActionRequest>,
    ) -> Result<Json<NodueRequestResponse>, PortalError> {
        self.act(req, Stage::Library, id.0, body.0).await
    }

    /// Library-cleared requests in the staff member's college and branch
    #[oai(path = "/staff/requests", method = "get", tag = "NodueTags::Staff")]
    async fn staff_queue(&self, req: &Request) -> Result<Json<NodueQueueResponse>, PortalError> {
        self.queue(req, Stage::Staff).await
    }

    /// Clear a request at the staff stage; the comment is required
    #[oai(path = "/staff/requests/:id/comment", method = "post", tag = "NodueTags::Staff")]
    async fn staff_comment(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<StageActionRequest>,
    ) -> Result<Json<NodueRequestResponse>, PortalError> {
        self.act(req, Stage::Staff, id.0, body.0).await
    }
}
