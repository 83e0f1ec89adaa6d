//! `SeaORM` Entity for students table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "students"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: Uuid,
    pub exam_number: String,
    pub name: String,
    pub class_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub school_id: Option<Uuid>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    ExamNumber,
    Name,
    ClassId,
    PhotoUrl,
    SchoolId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Class,
    School,
    Assessments,
    ReportCards,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Uuid.def(),
            Self::ExamNumber => ColumnType::String(StringLen::None).def().unique(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::ClassId => ColumnType::Uuid.def().null(),
            Self::PhotoUrl => ColumnType::String(StringLen::None).def().null(),
            Self::SchoolId => ColumnType::Uuid.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Class => Entity::belongs_to(super::class::Entity)
                .from(Column::ClassId)
                .to(super::class::Column::ClassId)
                .into(),
            Self::School => Entity::belongs_to(super::school::Entity)
                .from(Column::SchoolId)
                .to(super::school::Column::SchoolId)
                .into(),
            Self::Assessments => Entity::has_many(super::assessment::Entity).into(),
            Self::ReportCards => Entity::has_many(super::report_card::Entity).into(),
        }
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl Related<super::report_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
