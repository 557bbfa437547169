use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Field '{field}' must be at most {max} characters")]
    FieldTooLong { field: String, max: usize },

    #[error("User {username} has no college/branch assigned")]
    IncompleteScope { username: String },
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn too_long(field: &str, max: usize) -> Self {
        Self::FieldTooLong {
            field: field.to_string(),
            max,
        }
    }
}

/// Trim a free-text form value, treating blank input as absent
///
/// # Returns
/// * `Ok(None)` - The value was missing or only whitespace
/// * `Ok(Some(text))` - Trimmed text within `max` characters
/// * `Err(ValidationError::FieldTooLong)` - Longer than `max` characters after trimming
pub fn normalize_text(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(Some(trimmed.to_string()))
}

/// Like [`normalize_text`] but the value must be present
pub fn require_text(field: &str, value: Option<&str>, max: usize) -> Result<String, ValidationError> {
    normalize_text(field, value, max)?.ok_or_else(|| ValidationError::missing(field))
}
