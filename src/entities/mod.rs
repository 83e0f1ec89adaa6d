pub mod sea_orm_active_enums;

pub mod assessment;
pub mod class;
pub mod grade_config;
pub mod report_card;
pub mod school;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod teacher_class_subject;
pub mod user;
