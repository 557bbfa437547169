// API layer - HTTP endpoints
pub mod auth;
pub mod directory;
pub mod health;
pub mod helpers;
pub mod nodue;

pub use auth::AuthApi;
pub use directory::DirectoryApi;
pub use health::HealthApi;
pub use nodue::NodueApi;
