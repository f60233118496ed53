use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_at: DateTimeUtc,
    pub master_id: i32,
    pub request_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MasterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Master,
    #[sea_orm(
        belongs_to = "super::repair_request::Entity",
        from = "Column::RequestId",
        to = "super::repair_request::Column::Id",
        on_delete = "Cascade"
    )]
    Request,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Master.def()
    }
}

impl Related<super::repair_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
