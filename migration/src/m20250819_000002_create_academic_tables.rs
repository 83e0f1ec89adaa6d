use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teacher::TeacherId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teacher::Name).string().not_null())
                    .col(ColumnDef::new(Teacher::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Teacher::Password).string().not_null())
                    .col(ColumnDef::new(Teacher::SchoolId).uuid().not_null())
                    .col(
                        ColumnDef::new(Teacher::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Teacher::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Teacher::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teachers_school")
                            .from(Teacher::Table, Teacher::SchoolId)
                            .to(School::Table, School::SchoolId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Class::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Class::ClassId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Class::Name).string().not_null())
                    .col(ColumnDef::new(Class::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Class::Term).string().not_null())
                    .col(ColumnDef::new(Class::ClassCode).string().not_null().unique_key())
                    .col(ColumnDef::new(Class::SchoolId).uuid().null())
                    .col(
                        ColumnDef::new(Class::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_school")
                            .from(Class::Table, Class::SchoolId)
                            .to(School::Table, School::SchoolId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subject::SubjectId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Subject::Name).string().not_null())
                    .col(ColumnDef::new(Subject::Description).string().null())
                    .col(ColumnDef::new(Subject::SchoolId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subjects_school")
                            .from(Subject::Table, Subject::SchoolId)
                            .to(School::Table, School::SchoolId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Student::StudentId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Student::ExamNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Student::Name).string().not_null())
                    .col(ColumnDef::new(Student::ClassId).uuid().null())
                    .col(ColumnDef::new(Student::PhotoUrl).string().null())
                    .col(ColumnDef::new(Student::SchoolId).uuid().null())
                    .col(
                        ColumnDef::new(Student::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Student::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_class")
                            .from(Student::Table, Student::ClassId)
                            .to(Class::Table, Class::ClassId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_school")
                            .from(Student::Table, Student::SchoolId)
                            .to(School::Table, School::SchoolId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherClassSubject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherClassSubject::AssignmentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeacherClassSubject::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(TeacherClassSubject::ClassId).uuid().not_null())
                    .col(ColumnDef::new(TeacherClassSubject::SubjectId).uuid().not_null())
                    .col(
                        ColumnDef::new(TeacherClassSubject::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_class_subjects_teacher")
                            .from(TeacherClassSubject::Table, TeacherClassSubject::TeacherId)
                            .to(Teacher::Table, Teacher::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_class_subjects_class")
                            .from(TeacherClassSubject::Table, TeacherClassSubject::ClassId)
                            .to(Class::Table, Class::ClassId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_class_subjects_subject")
                            .from(TeacherClassSubject::Table, TeacherClassSubject::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Subject names repeat across schools, never inside one
        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_school_name")
                    .table(Subject::Table)
                    .col(Subject::SchoolId)
                    .col(Subject::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_class_subjects_unique")
                    .table(TeacherClassSubject::Table)
                    .col(TeacherClassSubject::TeacherId)
                    .col(TeacherClassSubject::ClassId)
                    .col(TeacherClassSubject::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherClassSubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Class::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
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
enum Teacher {
    #[sea_orm(iden = "teachers")]
    Table,
    TeacherId,
    Name,
    Email,
    Password,
    SchoolId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Class {
    #[sea_orm(iden = "classes")]
    Table,
    ClassId,
    Name,
    AcademicYear,
    Term,
    ClassCode,
    SchoolId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subject {
    #[sea_orm(iden = "subjects")]
    Table,
    SubjectId,
    Name,
    Description,
    SchoolId,
}

#[derive(DeriveIden)]
enum Student {
    #[sea_orm(iden = "students")]
    Table,
    StudentId,
    ExamNumber,
    Name,
    ClassId,
    PhotoUrl,
    SchoolId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherClassSubject {
    #[sea_orm(iden = "teacher_class_subjects")]
    Table,
    AssignmentId,
    TeacherId,
    ClassId,
    SubjectId,
    CreatedAt,
}
