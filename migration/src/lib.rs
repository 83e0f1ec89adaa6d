pub use sea_orm_migration::prelude::*;

mod m20250812_000001_create_schools_and_users;
mod m20250819_000002_create_academic_tables;
mod m20250826_000003_create_grading_tables;
mod m20250903_000004_add_class_teacher;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250812_000001_create_schools_and_users::Migration),
            Box::new(m20250819_000002_create_academic_tables::Migration),
            Box::new(m20250826_000003_create_grading_tables::Migration),
            Box::new(m20250903_000004_add_class_teacher::Migration),
        ]
    }
}
