use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(School::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(School::SchoolId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(School::Name).string().not_null())
                    .col(ColumnDef::new(School::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(School::AdminEmail).string().null().unique_key())
                    .col(ColumnDef::new(School::AdminPassword).string().null())
                    .col(ColumnDef::new(School::AdminName).string().null())
                    .col(ColumnDef::new(School::Phone).string().null())
                    .col(ColumnDef::new(School::Address).text().null())
                    .col(
                        ColumnDef::new(School::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(School::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(School::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::UserId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(User::FullName).string().not_null())
                    .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(User::Password).string().not_null())
                    .col(ColumnDef::new(User::Role).string().not_null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(User::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(School::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum School {
    #[sea_orm(iden = "schools")]
    Table,
    SchoolId,
    Name,
    Email,
    AdminEmail,
    AdminPassword,
    AdminName,
    Phone,
    Address,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    UserId,
    FullName,
    Email,
    Password,
    Role,
    CreatedAt,
    UpdatedAt,
}
