use thiserror::Error;

use crate::types::internal::{Action, Role};

/// Outcome of a refused access-policy check
///
/// Both variants are ordinary, recoverable results: the API layer turns them
/// into a redirect rather than a failure.
#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role {role} may not perform {action}")]
    Denied { role: Role, action: Action },
}
