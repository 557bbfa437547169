use std::fmt;

use crate::types::internal::Stage;

/// Page-level actions gated by the access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewDashboard,
    Logout,
    LookupDirectory,
    SubmitRequest,
    ViewOwnRequests,
    ManageDirectory,
    ActOnStage(Stage),
}

impl Action {
    /// Every action, in the order dashboards list them
    pub const ALL: [Action; 9] = [
        Action::ViewDashboard,
        Action::Logout,
        Action::LookupDirectory,
        Action::SubmitRequest,
        Action::ViewOwnRequests,
        Action::ManageDirectory,
        Action::ActOnStage(Stage::Hod),
        Action::ActOnStage(Stage::Library),
        Action::ActOnStage(Stage::Staff),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::ViewDashboard => "view_dashboard",
            Action::Logout => "logout",
            Action::LookupDirectory => "lookup_directory",
            Action::SubmitRequest => "submit_request",
            Action::ViewOwnRequests => "view_own_requests",
            Action::ManageDirectory => "manage_directory",
            Action::ActOnStage(Stage::Hod) => "hod_approve",
            Action::ActOnStage(Stage::Library) => "library_clear",
            Action::ActOnStage(Stage::Staff) => "staff_clear",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
