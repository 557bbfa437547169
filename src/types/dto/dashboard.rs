use poem_openapi::Object;

use crate::coordinators::DashboardView;
use crate::types::dto::auth::PrincipalResponse;

/// Requests waiting on the caller's stage
#[derive(Object, Debug)]
pub struct QueueSummary {
    /// Stage name: hod, library or staff
    pub stage: String,

    /// Number of requests waiting in the caller's college/branch
    pub waiting: u64,
}

/// Role-specific dashboard
#[derive(Object, Debug)]
pub struct DashboardResponse {
    pub principal: PrincipalResponse,

    /// Actions this role may perform
    pub actions: Vec<String>,

    /// Present for HOD, Library and Staff with a complete scope
    pub queue: Option<QueueSummary>,

    /// Present for students
    pub submitted_requests: Option<u64>,
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        Self {
            principal: PrincipalResponse::from(&view.principal),
            actions: view.actions.iter().map(|a| a.name().to_string()).collect(),
            queue: view.queue.map(|(stage, waiting)| QueueSummary {
                stage: stage.to_string(),
                waiting: waiting as u64,
            }),
            submitted_requests: view.submitted_requests.map(|n| n as u64),
        }
    }
}
