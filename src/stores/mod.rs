// Stores layer - Data access and repository pattern
pub mod faculty_staff_store;
pub mod nodue_request_store;
pub mod session_store;
pub mod user_store;

pub use faculty_staff_store::FacultyStaffStore;
pub use nodue_request_store::NodueRequestStore;
pub use session_store::SessionStore;
pub use user_store::{NewUser, UserStore};
