use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::grade_config;
use crate::entities::sea_orm_active_enums::CalculationMethod;
use crate::repositories::ActiveGradeConfig;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateGradeConfigRequest {
    #[schema(example = "Weighted 30/30/40")]
    pub configuration_name: String,

    pub calculation_method: CalculationMethod,

    #[serde(default = "default_weight_qa")]
    #[schema(example = 30)]
    pub weight_qa1: i32,

    #[serde(default = "default_weight_qa")]
    #[schema(example = 30)]
    pub weight_qa2: i32,

    #[serde(default = "default_weight_end_of_term")]
    #[schema(example = 40)]
    pub weight_end_of_term: i32,

    #[serde(default = "default_pass_mark")]
    #[schema(example = 50)]
    pub pass_mark: i32,
}

fn default_weight_qa() -> i32 {
    30
}

fn default_weight_end_of_term() -> i32 {
    40
}

fn default_pass_mark() -> i32 {
    50
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateGradeConfigRequest {
    pub configuration_name: Option<String>,
    pub calculation_method: Option<CalculationMethod>,
    pub weight_qa1: Option<i32>,
    pub weight_qa2: Option<i32>,
    pub weight_end_of_term: Option<i32>,
    pub pass_mark: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeConfigResponse {
    /// "default" when the synthesized fallback configuration is in effect.
    pub id: String,
    pub configuration_name: String,
    pub calculation_method: CalculationMethod,
    pub weight_qa1: i32,
    pub weight_qa2: i32,
    pub weight_end_of_term: i32,
    pub pass_mark: i32,
    pub is_active: bool,
    pub school_id: Option<Uuid>,
}

impl From<grade_config::Model> for GradeConfigResponse {
    fn from(model: grade_config::Model) -> Self {
        Self {
            id: model.grade_config_id.to_string(),
            configuration_name: model.configuration_name,
            calculation_method: model.calculation_method,
            weight_qa1: model.weight_qa1,
            weight_qa2: model.weight_qa2,
            weight_end_of_term: model.weight_end_of_term,
            pass_mark: model.pass_mark,
            is_active: model.is_active,
            school_id: model.school_id,
        }
    }
}

impl From<ActiveGradeConfig> for GradeConfigResponse {
    fn from(config: ActiveGradeConfig) -> Self {
        Self {
            id: config
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "default".to_string()),
            configuration_name: config.configuration_name,
            calculation_method: config.calculation_method,
            weight_qa1: config.weight_qa1,
            weight_qa2: config.weight_qa2,
            weight_end_of_term: config.weight_end_of_term,
            pass_mark: config.pass_mark,
            is_active: config.is_active,
            school_id: config.school_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeConfigListResponse {
    pub total: usize,
    pub configs: Vec<GradeConfigResponse>,
}
