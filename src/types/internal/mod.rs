// Internal domain types - never exposed directly through the API
pub mod access;
pub mod approval;
pub mod context;
pub mod principal;
pub mod role;
pub mod scope;

pub use access::Action;
pub use approval::{ApprovalFields, ApprovalState, Stage};
pub use context::{RequestContext, RequestId, RequestSource};
pub use principal::Principal;
pub use role::Role;
pub use scope::ScopeKey;
