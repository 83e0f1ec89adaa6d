use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Add class_teacher_id column as nullable
        manager
            .alter_table(
                Table::alter()
                    .table(Class::Table)
                    .add_column(ColumnDef::new(Class::ClassTeacherId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_classes_class_teacher")
                    .from(Class::Table, Class::ClassTeacherId)
                    .to(Teacher::Table, Teacher::TeacherId)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_classes_class_teacher")
                    .table(Class::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Class::Table)
                    .drop_column(Class::ClassTeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Class {
    #[sea_orm(iden = "classes")]
    Table,
    ClassTeacherId,
}

#[derive(DeriveIden)]
enum Teacher {
    #[sea_orm(iden = "teachers")]
    Table,
    TeacherId,
}
