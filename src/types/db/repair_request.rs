use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_date: Date,
    pub equipment_type: String,
    pub equipment_model: String,
    #[sea_orm(column_type = "Text")]
    pub problem_description: String,
    pub status: String,
    pub completion_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub repair_parts: Option<String>,
    pub deadline: Option<Date>,
    pub priority: String,
    pub created_at: DateTimeUtc,
    pub master_id: Option<i32>,
    pub client_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MasterId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Master,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClientId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Client,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
