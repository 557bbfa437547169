use std::fmt;

/// (college name, branch name) pair used to filter requests and directory entries
///
/// Matching is plain string equality; there is no hierarchy between colleges and
/// branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub college_name: String,
    pub branch_name: String,
}

impl ScopeKey {
    pub fn new(college_name: impl Into<String>, branch_name: impl Into<String>) -> Self {
        Self {
            college_name: college_name.into(),
            branch_name: branch_name.into(),
        }
    }

    /// Build a scope from the optional columns stored on a user
    ///
    /// Returns `None` unless both parts are present.
    pub fn from_parts(college_name: Option<&str>, branch_name: Option<&str>) -> Option<Self> {
        match (college_name, branch_name) {
            (Some(college), Some(branch)) => Some(Self::new(college, branch)),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.college_name, self.branch_name)
    }
}
