use thiserror::Error;

/// Login and account-creation failures
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown username or wrong password; the two are not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
}
