// Database entities - SeaORM models
pub mod faculty_staff;
pub mod nodue_request;
pub mod session;
pub mod user;
