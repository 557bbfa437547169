use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::nodue_request;

/// Optional comment attached to a stage action
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct StageActionRequest {
    pub comment: Option<String>,
}

/// A no-due request as shown in queues and to its student
#[derive(Object, Debug)]
pub struct NodueRequestResponse {
    pub id: i32,
    pub student_id: String,

    /// pending, hod_approved, library_cleared or fully_cleared
    pub state: String,

    pub is_approved: bool,
    pub hod_comment: Option<String>,
    pub library_comment: Option<String>,
    pub staff_comment: Option<String>,
    pub college_name: String,
    pub branch_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<nodue_request::Model> for NodueRequestResponse {
    fn from(request: nodue_request::Model) -> Self {
        let state = request
            .approval_fields()
            .state()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| "inconsistent".to_string());

        Self {
            id: request.id,
            student_id: request.student_id,
            state,
            is_approved: request.is_approved,
            hod_comment: request.hod_comment,
            library_comment: request.library_comment,
            staff_comment: request.staff_comment,
            college_name: request.college_name,
            branch_name: request.branch_name,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// A role's queue
#[derive(Object, Debug)]
pub struct NodueQueueResponse {
    pub stage: String,
    pub requests: Vec<NodueRequestResponse>,
}

/// API response for request submission
#[derive(ApiResponse)]
pub enum SubmitNodueApiResponse {
    /// Request created in the pending state
    #[oai(status = 201)]
    Created(Json<NodueRequestResponse>),
}
