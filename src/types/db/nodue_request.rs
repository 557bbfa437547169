use sea_orm::entity::prelude::*;

use crate::types::internal::{ApprovalFields, ScopeKey};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "nodue_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub student_id: String,

    // Approval progress; see ApprovalFields
    pub is_approved: bool,
    pub hod_comment: Option<String>,
    pub library_comment: Option<String>,
    pub staff_comment: Option<String>,

    // Snapshot of the student's scope at submission time
    pub college_name: String,
    pub branch_name: String,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    pub fn approval_fields(&self) -> ApprovalFields {
        ApprovalFields {
            is_approved: self.is_approved,
            hod_comment: self.hod_comment.clone(),
            library_comment: self.library_comment.clone(),
            staff_comment: self.staff_comment.clone(),
        }
    }

    pub fn scope(&self) -> ScopeKey {
        ScopeKey::new(&self.college_name, &self.branch_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Student,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
