use thiserror::Error;

use crate::types::internal::{ApprovalState, Stage};

#[derive(Error, Debug, PartialEq)]
pub enum ApprovalError {
    #[error("No-due request {request_id} not found")]
    RequestNotFound { request_id: i32 },

    /// The request exists but belongs to another college/branch
    #[error("No-due request {request_id} is outside the caller's scope")]
    OutOfScope { request_id: i32 },

    #[error("Stage {stage} expects a request in state {expected}, found {actual}")]
    WrongState {
        stage: Stage,
        expected: ApprovalState,
        actual: ApprovalState,
    },

    #[error("Stage {stage} requires a comment")]
    CommentRequired { stage: Stage },

    #[error("Approval columns do not describe a valid state: {0}")]
    InconsistentFields(String),
}
