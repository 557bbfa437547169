use crate::errors::internal::ValidationError;
use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::{Role, ScopeKey};

/// The authenticated actor performing an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub college_name: Option<String>,
    pub branch_name: Option<String>,
}

impl Principal {
    pub fn scope(&self) -> Option<ScopeKey> {
        ScopeKey::from_parts(self.college_name.as_deref(), self.branch_name.as_deref())
    }

    /// Scope of the principal, or a validation error when college or branch is unset
    pub fn require_scope(&self) -> Result<ScopeKey, ValidationError> {
        self.scope().ok_or_else(|| ValidationError::IncompleteScope {
            username: self.username.clone(),
        })
    }
}

impl TryFrom<user::Model> for Principal {
    type Error = InternalError;

    fn try_from(user: user::Model) -> Result<Self, Self::Error> {
        let role = user
            .role
            .parse::<Role>()
            .map_err(|e| InternalError::parse("role", e))?;

        Ok(Self {
            user_id: user.id,
            username: user.username,
            role,
            college_name: user.college_name,
            branch_name: user.branch_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_model(role: &str, college: Option<&str>, branch: Option<&str>) -> user::Model {
        user::Model {
            id: "u-1".to_string(),
            username: "asha".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            college_name: college.map(str::to_string),
            branch_name: branch.map(str::to_string),
            created_at: 0,
        }
    }

    #[test]
    fn converts_user_row_into_principal() {
        let principal = Principal::try_from(user_model("HOD", Some("X"), Some("CS"))).unwrap();

        assert_eq!(principal.role, Role::Hod);
        assert_eq!(principal.scope(), Some(ScopeKey::new("X", "CS")));
    }

    #[test]
    fn rejects_unknown_role_string() {
        let result = Principal::try_from(user_model("Janitor", None, None));
        assert!(matches!(result, Err(InternalError::Parse { .. })));
    }

    #[test]
    fn require_scope_fails_without_branch() {
        let principal = Principal::try_from(user_model("Student", Some("X"), None)).unwrap();
        assert!(matches!(
            principal.require_scope(),
            Err(ValidationError::IncompleteScope { .. })
        ));
    }
}
