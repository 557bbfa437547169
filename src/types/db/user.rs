use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,

    // One of Admin, Student, HOD, Library, Staff
    pub role: String,

    pub college_name: Option<String>,
    pub branch_name: Option<String>,

    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::nodue_request::Entity")]
    NodueRequest,
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
}

impl Related<super::nodue_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NodueRequest.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
