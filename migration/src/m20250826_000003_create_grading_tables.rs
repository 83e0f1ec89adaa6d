use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assessment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessment::AssessmentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessment::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Assessment::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Assessment::ClassId).uuid().not_null())
                    .col(ColumnDef::new(Assessment::AssessmentType).string().not_null())
                    .col(ColumnDef::new(Assessment::Score).integer().not_null())
                    .col(ColumnDef::new(Assessment::Grade).string().not_null())
                    .col(
                        ColumnDef::new(Assessment::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Assessment::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_student")
                            .from(Assessment::Table, Assessment::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_subject")
                            .from(Assessment::Table, Assessment::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_class")
                            .from(Assessment::Table, Assessment::ClassId)
                            .to(Class::Table, Class::ClassId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A student retaking a class in a later term starts with fresh rows,
        // hence the class dimension in the unique key.
        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_unique")
                    .table(Assessment::Table)
                    .col(Assessment::StudentId)
                    .col(Assessment::SubjectId)
                    .col(Assessment::AssessmentType)
                    .col(Assessment::ClassId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportCard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportCard::ReportCardId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportCard::StudentId).uuid().not_null())
                    .col(ColumnDef::new(ReportCard::Term).string().not_null())
                    .col(
                        ColumnDef::new(ReportCard::DaysPresent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::DaysAbsent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::DaysLate)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::TeacherRemarks)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ReportCard::ClassRank)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::Qa1Rank)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::Qa2Rank)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReportCard::TotalStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ReportCard::OverallAverage).double().null())
                    .col(ColumnDef::new(ReportCard::OverallGrade).string().null())
                    .col(
                        ColumnDef::new(ReportCard::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReportCard::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_cards_student")
                            .from(ReportCard::Table, ReportCard::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_cards_student_term")
                    .table(ReportCard::Table)
                    .col(ReportCard::StudentId)
                    .col(ReportCard::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeConfig::GradeConfigId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradeConfig::SchoolId).uuid().null())
                    .col(ColumnDef::new(GradeConfig::ConfigurationName).string().not_null())
                    .col(ColumnDef::new(GradeConfig::CalculationMethod).string().not_null())
                    .col(
                        ColumnDef::new(GradeConfig::WeightQa1)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::WeightQa2)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::WeightEndOfTerm)
                            .integer()
                            .not_null()
                            .default(40),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::PassMark)
                            .integer()
                            .not_null()
                            .default(50),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GradeConfig::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_configs_school")
                            .from(GradeConfig::Table, GradeConfig::SchoolId)
                            .to(School::Table, School::SchoolId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grade_configs_school_name")
                    .table(GradeConfig::Table)
                    .col(GradeConfig::SchoolId)
                    .col(GradeConfig::ConfigurationName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GradeConfig::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportCard::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum School {
    #[sea_orm(iden = "schools")]
    Table,
    SchoolId,
}

#[derive(DeriveIden)]
enum Class {
    #[sea_orm(iden = "classes")]
    Table,
    ClassId,
}

#[derive(DeriveIden)]
enum Subject {
    #[sea_orm(iden = "subjects")]
    Table,
    SubjectId,
}

#[derive(DeriveIden)]
enum Student {
    #[sea_orm(iden = "students")]
    Table,
    StudentId,
}

#[derive(DeriveIden)]
enum Assessment {
    #[sea_orm(iden = "assessments")]
    Table,
    AssessmentId,
    StudentId,
    SubjectId,
    ClassId,
    AssessmentType,
    Score,
    Grade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReportCard {
    #[sea_orm(iden = "report_cards")]
    Table,
    ReportCardId,
    StudentId,
    Term,
    DaysPresent,
    DaysAbsent,
    DaysLate,
    TeacherRemarks,
    ClassRank,
    Qa1Rank,
    Qa2Rank,
    TotalStudents,
    OverallAverage,
    OverallGrade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeConfig {
    #[sea_orm(iden = "grade_configs")]
    Table,
    GradeConfigId,
    SchoolId,
    ConfigurationName,
    CalculationMethod,
    WeightQa1,
    WeightQa2,
    WeightEndOfTerm,
    PassMark,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
