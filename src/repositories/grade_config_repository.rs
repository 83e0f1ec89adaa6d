use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::entities::grade_config;
use crate::entities::sea_orm_active_enums::CalculationMethod;
use crate::error::ServiceError;
use crate::grading::Policy;
use crate::repositories::report_card_repository::ReportCardRepository;
use crate::static_service::DATABASE_CONNECTION;

/// The grading rules in effect for a school. Either a stored configuration
/// or the synthesized default (`id: None`), which is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGradeConfig {
    pub id: Option<Uuid>,
    pub configuration_name: String,
    pub calculation_method: CalculationMethod,
    pub weight_qa1: i32,
    pub weight_qa2: i32,
    pub weight_end_of_term: i32,
    pub pass_mark: i32,
    pub is_active: bool,
    pub school_id: Option<Uuid>,
}

impl ActiveGradeConfig {
    pub fn synthesized_default(school_id: Option<Uuid>) -> Self {
        Self {
            id: None,
            configuration_name: "Default (End of Term Only)".to_string(),
            calculation_method: CalculationMethod::EndOfTermOnly,
            weight_qa1: 0,
            weight_qa2: 0,
            weight_end_of_term: 100,
            pass_mark: 50,
            is_active: true,
            school_id,
        }
    }

    pub fn from_model(model: grade_config::Model) -> Self {
        Self {
            id: Some(model.grade_config_id),
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

    pub fn policy(&self) -> Policy {
        Policy {
            method: self.calculation_method.clone(),
            weight_qa1: self.weight_qa1 as f64,
            weight_qa2: self.weight_qa2 as f64,
            weight_end_of_term: self.weight_end_of_term as f64,
            pass_mark: self.pass_mark as f64,
        }
    }
}

pub struct GradeConfigRepository;

impl GradeConfigRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn active_or_default(
        &self,
        school_id: Option<Uuid>,
    ) -> Result<ActiveGradeConfig, ServiceError> {
        let db = self.get_connection();

        let mut query = grade_config::Entity::find().filter(grade_config::Column::IsActive.eq(true));
        if let Some(school_id) = school_id {
            query = query.filter(grade_config::Column::SchoolId.eq(school_id));
        }

        let config = query.one(db).await?;

        Ok(match config {
            Some(model) => ActiveGradeConfig::from_model(model),
            None => ActiveGradeConfig::synthesized_default(school_id),
        })
    }

    pub async fn find_all(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<grade_config::Model>, ServiceError> {
        let db = self.get_connection();

        let mut query = grade_config::Entity::find()
            .order_by_desc(grade_config::Column::IsActive)
            .order_by_desc(grade_config::Column::CreatedAt);
        if let Some(school_id) = ctx.school_id {
            query = query.filter(grade_config::Column::SchoolId.eq(school_id));
        }

        let configs = query.all(db).await?;
        Ok(configs)
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        configuration_name: String,
        calculation_method: CalculationMethod,
        weight_qa1: i32,
        weight_qa2: i32,
        weight_end_of_term: i32,
        pass_mark: i32,
    ) -> Result<grade_config::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = grade_config::Entity::find()
            .filter(grade_config::Column::ConfigurationName.eq(configuration_name.as_str()));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(grade_config::Column::SchoolId.eq(school_id));
        }
        if query.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Grade configuration \"{}\" already exists",
                configuration_name
            )));
        }

        let now = Utc::now().naive_utc();
        let config_model = grade_config::ActiveModel {
            grade_config_id: Set(Uuid::new_v4()),
            school_id: Set(ctx.school_id),
            configuration_name: Set(configuration_name),
            calculation_method: Set(calculation_method),
            weight_qa1: Set(weight_qa1),
            weight_qa2: Set(weight_qa2),
            weight_end_of_term: Set(weight_end_of_term),
            pass_mark: Set(pass_mark),
            is_active: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = config_model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        grade_config_id: Uuid,
        ctx: &RequestContext,
        updates: GradeConfigUpdate,
    ) -> Result<grade_config::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = grade_config::Entity::find()
            .filter(grade_config::Column::GradeConfigId.eq(grade_config_id));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(grade_config::Column::SchoolId.eq(school_id));
        }

        let config = query.one(db).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Grade configuration {} not found", grade_config_id))
        })?;

        let mut active_model: grade_config::ActiveModel = config.into();

        if let Some(configuration_name) = updates.configuration_name {
            active_model.configuration_name = Set(configuration_name);
        }
        if let Some(calculation_method) = updates.calculation_method {
            active_model.calculation_method = Set(calculation_method);
        }
        if let Some(weight_qa1) = updates.weight_qa1 {
            active_model.weight_qa1 = Set(weight_qa1);
        }
        if let Some(weight_qa2) = updates.weight_qa2 {
            active_model.weight_qa2 = Set(weight_qa2);
        }
        if let Some(weight_end_of_term) = updates.weight_end_of_term {
            active_model.weight_end_of_term = Set(weight_end_of_term);
        }
        if let Some(pass_mark) = updates.pass_mark {
            active_model.pass_mark = Set(pass_mark);
        }

        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// Flips the active configuration for the tenant: every other
    /// configuration is deactivated and the chosen one activated inside one
    /// transaction, then every report card in the tenant is recomputed
    /// under the new rules.
    pub async fn activate(
        &self,
        grade_config_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<grade_config::Model, ServiceError> {
        let db = self.get_connection();
        let txn = db.begin().await?;

        let mut deactivate = grade_config::Entity::update_many()
            .col_expr(grade_config::Column::IsActive, Expr::value(false))
            .filter(grade_config::Column::IsActive.eq(true));
        if let Some(school_id) = ctx.school_id {
            deactivate = deactivate.filter(grade_config::Column::SchoolId.eq(school_id));
        }
        deactivate.exec(&txn).await?;

        let mut query = grade_config::Entity::find()
            .filter(grade_config::Column::GradeConfigId.eq(grade_config_id));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(grade_config::Column::SchoolId.eq(school_id));
        }

        let config = query.one(&txn).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Grade configuration {} not found", grade_config_id))
        })?;

        let mut active_model: grade_config::ActiveModel = config.into();
        active_model.is_active = Set(true);
        active_model.updated_at = Set(Utc::now().naive_utc());
        let result = active_model.update(&txn).await?;

        txn.commit().await?;

        let updated = ReportCardRepository::new()
            .refresh_overall_grades(ctx)
            .await?;
        tracing::info!(
            config = %result.configuration_name,
            report_cards = updated,
            "Activated grade configuration and recomputed report cards"
        );

        Ok(result)
    }
}

pub struct GradeConfigUpdate {
    pub configuration_name: Option<String>,
    pub calculation_method: Option<CalculationMethod>,
    pub weight_qa1: Option<i32>,
    pub weight_qa2: Option<i32>,
    pub weight_end_of_term: Option<i32>,
    pub pass_mark: Option<i32>,
}
