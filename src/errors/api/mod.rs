// API-facing error types
pub mod auth;
pub mod portal;

// Re-exports for convenience
pub use auth::AuthError;
pub use portal::PortalError;
