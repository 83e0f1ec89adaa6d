//! `SeaORM` Active Enums

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RoleEnum {
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    #[sea_orm(string_value = "school_admin")]
    SchoolAdmin,
    #[sea_orm(string_value = "teacher")]
    Teacher,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    #[sea_orm(string_value = "qa1")]
    Qa1,
    #[sea_orm(string_value = "qa2")]
    Qa2,
    #[sea_orm(string_value = "end_of_term")]
    EndOfTerm,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    #[sea_orm(string_value = "average_all")]
    AverageAll,
    #[sea_orm(string_value = "end_of_term_only")]
    EndOfTermOnly,
    #[sea_orm(string_value = "weighted_average")]
    WeightedAverage,
}
