use sea_orm::entity::prelude::*;

use crate::types::internal::ScopeKey;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculty_staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub college_name: String,
    pub branch_name: String,
    pub faculty_name: String,
    pub staff_name: String,
    pub created_at: i64,
}

impl Model {
    pub fn scope(&self) -> ScopeKey {
        ScopeKey::new(&self.college_name, &self.branch_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
