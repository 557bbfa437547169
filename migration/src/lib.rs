pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_nodue_requests;
mod m20250301_000003_create_faculty_staff;
mod m20250305_000001_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_nodue_requests::Migration),
            Box::new(m20250301_000003_create_faculty_staff::Migration),
            Box::new(m20250305_000001_create_sessions::Migration),
        ]
    }
}
