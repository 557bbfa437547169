// Coordinators layer - Workflow orchestration
//
// Coordinators handle pure workflow orchestration by composing provider operations
// for specific API endpoints. Every gated operation starts with an access-policy
// check against the explicit RequestContext.

pub mod dashboard_coordinator;
pub mod directory_coordinator;
pub mod login_coordinator;
pub mod nodue_coordinator;

pub use dashboard_coordinator::{DashboardCoordinator, DashboardView};
pub use directory_coordinator::DirectoryCoordinator;
pub use login_coordinator::LoginCoordinator;
pub use nodue_coordinator::NodueCoordinator;
