// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. They validate input, run the approval state
// machine and call into stores.

pub mod access_policy;
pub mod approval_provider;
pub mod authentication_provider;
pub mod crypto_provider;
pub mod directory_provider;
pub mod user_provider;

// Re-export providers for clean imports
pub use access_policy::AccessPolicy;
pub use approval_provider::ApprovalProvider;
pub use authentication_provider::{AuthenticationProvider, IssuedSession};
pub use crypto_provider::CryptoProvider;
pub use directory_provider::{DirectoryListing, DirectoryProvider};
pub use user_provider::{CreateUserRequest, UserProvider};
