//! `SeaORM` Entity for classes table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "classes"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub class_id: Uuid,
    pub name: String,
    pub academic_year: String,
    pub term: String,
    pub class_code: String,
    pub class_teacher_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    ClassId,
    Name,
    AcademicYear,
    Term,
    ClassCode,
    ClassTeacherId,
    SchoolId,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ClassId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    School,
    ClassTeacher,
    Students,
    Assessments,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ClassId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::AcademicYear => ColumnType::String(StringLen::None).def(),
            Self::Term => ColumnType::String(StringLen::None).def(),
            Self::ClassCode => ColumnType::String(StringLen::None).def().unique(),
            Self::ClassTeacherId => ColumnType::Uuid.def().null(),
            Self::SchoolId => ColumnType::Uuid.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::School => Entity::belongs_to(super::school::Entity)
                .from(Column::SchoolId)
                .to(super::school::Column::SchoolId)
                .into(),
            Self::ClassTeacher => Entity::belongs_to(super::teacher::Entity)
                .from(Column::ClassTeacherId)
                .to(super::teacher::Column::TeacherId)
                .into(),
            Self::Students => Entity::has_many(super::student::Entity).into(),
            Self::Assessments => Entity::has_many(super::assessment::Entity).into(),
        }
    }
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
