use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Phone).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Users::Login)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    // Stored verbatim; see AuthenticationProvider::verify_credentials.
                    .col(ColumnDef::new(Users::Password).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requests::StartDate).date().not_null())
                    .col(ColumnDef::new(Requests::EquipmentType).string_len(100).not_null())
                    .col(ColumnDef::new(Requests::EquipmentModel).string_len(255).not_null())
                    .col(ColumnDef::new(Requests::ProblemDescription).text().not_null())
                    .col(
                        ColumnDef::new(Requests::Status)
                            .string_len(50)
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Requests::CompletionDate).date().null())
                    .col(ColumnDef::new(Requests::RepairParts).text().null())
                    .col(ColumnDef::new(Requests::Deadline).date().null())
                    .col(
                        ColumnDef::new(Requests::Priority)
                            .string_len(20)
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Requests::MasterId).integer().null())
                    .col(ColumnDef::new(Requests::ClientId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_master_id")
                            .from(Requests::Table, Requests::MasterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_client_id")
                            .from(Requests::Table, Requests::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_status")
                    .table(Requests::Table)
                    .col(Requests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_client_id")
                    .table(Requests::Table)
                    .col(Requests::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_master_id")
                    .table(Requests::Table)
                    .col(Requests::MasterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::Message).text().not_null())
                    .col(
                        ColumnDef::new(Comments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Comments::MasterId).integer().not_null())
                    .col(ColumnDef::new(Comments::RequestId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_master_id")
                            .from(Comments::Table, Comments::MasterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_request_id")
                            .from(Comments::Table, Comments::RequestId)
                            .to(Requests::Table, Requests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_request_id")
                    .table(Comments::Table)
                    .col(Comments::RequestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FullName,
    Phone,
    Login,
    Password,
    Role,
    CreatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    StartDate,
    EquipmentType,
    EquipmentModel,
    ProblemDescription,
    Status,
    CompletionDate,
    RepairParts,
    Deadline,
    Priority,
    CreatedAt,
    MasterId,
    ClientId,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Message,
    CreatedAt,
    MasterId,
    RequestId,
}
