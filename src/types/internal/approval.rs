use std::fmt;

use crate::errors::internal::ApprovalError;
use crate::types::internal::Role;

/// Position of a no-due request in the three-stage approval workflow
///
/// The state is never stored directly. It is derived from the persisted
/// `is_approved`, `library_comment` and `staff_comment` columns (see
/// [`ApprovalFields::state`]).
///
/// ```text
/// Pending --HOD--> HodApproved --Library--> LibraryCleared --Staff--> FullyCleared
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalState {
    Pending,
    HodApproved,
    LibraryCleared,
    FullyCleared,
}

impl ApprovalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Pending => "pending",
            ApprovalState::HodApproved => "hod_approved",
            ApprovalState::LibraryCleared => "library_cleared",
            ApprovalState::FullyCleared => "fully_cleared",
        }
    }

    /// Stage that consumes requests in this state, `None` once terminal
    pub fn awaiting(&self) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| stage.consumes() == *self)
    }

    pub fn is_terminal(&self) -> bool {
        self.awaiting().is_none()
    }

    /// Validate that `stage` may act on a request in this state
    ///
    /// # Returns
    /// * `Ok(ApprovalState)` - The state the request moves to
    /// * `Err(ApprovalError::WrongState)` - The request is not waiting on `stage`
    pub fn advance(self, stage: Stage) -> Result<ApprovalState, ApprovalError> {
        if self != stage.consumes() {
            return Err(ApprovalError::WrongState {
                stage,
                expected: stage.consumes(),
                actual: self,
            });
        }
        Ok(stage.produces())
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three sequential approval steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Hod,
    Library,
    Staff,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Hod, Stage::Library, Stage::Staff];

    /// Role that performs this stage
    pub fn role(&self) -> Role {
        match self {
            Stage::Hod => Role::Hod,
            Stage::Library => Role::Library,
            Stage::Staff => Role::Staff,
        }
    }

    pub fn for_role(role: Role) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| stage.role() == role)
    }

    /// State a request must be in for this stage to act on it
    pub fn consumes(&self) -> ApprovalState {
        match self {
            Stage::Hod => ApprovalState::Pending,
            Stage::Library => ApprovalState::HodApproved,
            Stage::Staff => ApprovalState::LibraryCleared,
        }
    }

    pub fn produces(&self) -> ApprovalState {
        match self {
            Stage::Hod => ApprovalState::HodApproved,
            Stage::Library => ApprovalState::LibraryCleared,
            Stage::Staff => ApprovalState::FullyCleared,
        }
    }

    /// Whether acting on this stage requires a non-empty comment
    ///
    /// The HOD comment is optional. Library and Staff comments are what mark
    /// their stage as done, so they cannot be omitted.
    pub fn requires_comment(&self) -> bool {
        !matches!(self, Stage::Hod)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Hod => "hod",
            Stage::Library => "library",
            Stage::Staff => "staff",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted columns that encode a request's approval progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalFields {
    pub is_approved: bool,
    pub hod_comment: Option<String>,
    pub library_comment: Option<String>,
    pub staff_comment: Option<String>,
}

impl ApprovalFields {
    /// Derive the workflow state from the stored columns
    ///
    /// # Returns
    /// * `Ok(ApprovalState)` - One of the four defined states
    /// * `Err(ApprovalError::InconsistentFields)` - A combination no transition produces,
    ///   e.g. a library comment on a request the HOD never approved
    pub fn state(&self) -> Result<ApprovalState, ApprovalError> {
        let state = match (
            self.is_approved,
            self.hod_comment.is_some(),
            self.library_comment.is_some(),
            self.staff_comment.is_some(),
        ) {
            (false, false, false, false) => ApprovalState::Pending,
            (true, _, false, false) => ApprovalState::HodApproved,
            (true, _, true, false) => ApprovalState::LibraryCleared,
            (true, _, true, true) => ApprovalState::FullyCleared,
            _ => return Err(ApprovalError::InconsistentFields(format!("{:?}", self))),
        };
        Ok(state)
    }

    /// Apply `stage`'s action and return the resulting columns
    ///
    /// Leaves `self` untouched; the caller persists the returned value.
    ///
    /// # Arguments
    /// * `stage` - The stage acting on the request
    /// * `comment` - Optional for the HOD, required for Library and Staff
    ///
    /// # Returns
    /// * `Ok(ApprovalFields)` - Columns for the next state
    /// * `Err(ApprovalError)` - Wrong state, missing comment or inconsistent input
    pub fn apply(&self, stage: Stage, comment: Option<String>) -> Result<ApprovalFields, ApprovalError> {
        self.state()?.advance(stage)?;

        if stage.requires_comment() && comment.is_none() {
            return Err(ApprovalError::CommentRequired { stage });
        }

        let mut next = self.clone();
        match stage {
            Stage::Hod => {
                next.is_approved = true;
                next.hod_comment = comment;
            }
            Stage::Library => next.library_comment = comment,
            Stage::Staff => next.staff_comment = comment,
        }
        Ok(next)
    }
}
