//! `SeaORM` Entity for schools table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "schools"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
    pub admin_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SchoolId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Teachers,
    Classes,
    Subjects,
    Students,
    GradeConfigs,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SchoolId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Email => ColumnType::String(StringLen::None).def().unique(),
            Self::AdminEmail => ColumnType::String(StringLen::None).def().null().unique(),
            Self::AdminPassword => ColumnType::String(StringLen::None).def().null(),
            Self::AdminName => ColumnType::String(StringLen::None).def().null(),
            Self::Phone => ColumnType::String(StringLen::None).def().null(),
            Self::Address => ColumnType::Text.def().null(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Teachers => Entity::has_many(super::teacher::Entity).into(),
            Self::Classes => Entity::has_many(super::class::Entity).into(),
            Self::Subjects => Entity::has_many(super::subject::Entity).into(),
            Self::Students => Entity::has_many(super::student::Entity).into(),
            Self::GradeConfigs => Entity::has_many(super::grade_config::Entity).into(),
        }
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::grade_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeConfigs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
