pub mod assessments;
pub mod auth;
pub mod classes;
pub mod grade_configs;
pub mod health;
pub mod report_cards;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;
