//! `SeaORM` Entity for report_cards table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "report_cards"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub report_card_id: Uuid,
    pub student_id: Uuid,
    pub term: String,
    pub days_present: i32,
    pub days_absent: i32,
    pub days_late: i32,
    pub teacher_remarks: String,
    pub class_rank: i32,
    pub qa1_rank: i32,
    pub qa2_rank: i32,
    pub total_students: i32,
    pub overall_average: Option<f64>,
    pub overall_grade: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ReportCardId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ReportCardId => ColumnType::Uuid.def(),
            Self::StudentId => ColumnType::Uuid.def(),
            Self::Term => ColumnType::String(StringLen::None).def(),
            Self::DaysPresent => ColumnType::Integer.def(),
            Self::DaysAbsent => ColumnType::Integer.def(),
            Self::DaysLate => ColumnType::Integer.def(),
            Self::TeacherRemarks => ColumnType::Text.def(),
            Self::ClassRank => ColumnType::Integer.def(),
            Self::Qa1Rank => ColumnType::Integer.def(),
            Self::Qa2Rank => ColumnType::Integer.def(),
            Self::TotalStudents => ColumnType::Integer.def(),
            Self::OverallAverage => ColumnType::Double.def().null(),
            Self::OverallGrade => ColumnType::String(StringLen::None).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::StudentId)
                .into(),
        }
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
