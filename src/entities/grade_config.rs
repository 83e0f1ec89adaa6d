//! `SeaORM` Entity for grade_configs table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CalculationMethod;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "grade_configs"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub grade_config_id: Uuid,
    pub school_id: Option<Uuid>,
    pub configuration_name: String,
    pub calculation_method: CalculationMethod,
    pub weight_qa1: i32,
    pub weight_qa2: i32,
    pub weight_end_of_term: i32,
    pub pass_mark: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    GradeConfigId,
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
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::GradeConfigId => ColumnType::Uuid.def(),
            Self::SchoolId => ColumnType::Uuid.def().null(),
            Self::ConfigurationName => ColumnType::String(StringLen::None).def(),
            Self::CalculationMethod => ColumnType::String(StringLen::None).def(),
            Self::WeightQa1 => ColumnType::Integer.def(),
            Self::WeightQa2 => ColumnType::Integer.def(),
            Self::WeightEndOfTerm => ColumnType::Integer.def(),
            Self::PassMark => ColumnType::Integer.def(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
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
        }
    }
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
