// DTOs - request and response bodies of the HTTP API
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod directory;
pub mod nodue;
