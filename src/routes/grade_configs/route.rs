use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CreateGradeConfigRequest, GradeConfigListResponse, GradeConfigResponse,
    UpdateGradeConfigRequest,
};
use crate::context::RequestContext;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{GradeConfigRepository, GradeConfigUpdate};
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/grade-configs", get(get_all_grade_configs))
        .route("/api/v1/grade-configs", post(create_grade_config))
        .route("/api/v1/grade-configs/active", get(get_active_grade_config))
        .route("/api/v1/grade-configs/{config_id}", put(update_grade_config))
        .route(
            "/api/v1/grade-configs/{config_id}/activate",
            post(activate_grade_config),
        )
}

fn require_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin && claims.role != RoleEnum::SchoolAdmin {
        return Err(ServiceError::Forbidden(
            "Only school admin can manage grade configurations".to_string(),
        ));
    }
    Ok(())
}

/// The configuration currently driving grades (stored or synthesized)
#[utoipa::path(
    get,
    path = "/api/v1/grade-configs/active",
    responses(
        (status = 200, description = "Active configuration", body = GradeConfigResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grade Configurations"
)]
pub async fn get_active_grade_config(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<GradeConfigResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let config = GradeConfigRepository::new()
        .active_or_default(ctx.school_id)
        .await?;

    Ok((StatusCode::OK, Json(config.into())))
}

/// List grade configurations, active first
#[utoipa::path(
    get,
    path = "/api/v1/grade-configs",
    responses(
        (status = 200, description = "Configurations retrieved", body = GradeConfigListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grade Configurations"
)]
pub async fn get_all_grade_configs(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<GradeConfigListResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let configs = GradeConfigRepository::new().find_all(&ctx).await?;

    let response = GradeConfigListResponse {
        total: configs.len(),
        configs: configs.into_iter().map(GradeConfigResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Create a grade configuration (Admin only); inactive until activated
#[utoipa::path(
    post,
    path = "/api/v1/grade-configs",
    request_body = CreateGradeConfigRequest,
    responses(
        (status = 201, description = "Configuration created", body = GradeConfigResponse),
        (status = 409, description = "Configuration name already exists"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Grade Configurations"
)]
pub async fn create_grade_config(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateGradeConfigRequest>,
) -> Result<(StatusCode, Json<GradeConfigResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let config = GradeConfigRepository::new()
        .create(
            &ctx,
            payload.configuration_name,
            payload.calculation_method,
            payload.weight_qa1,
            payload.weight_qa2,
            payload.weight_end_of_term,
            payload.pass_mark,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(config.into())))
}

/// Update a grade configuration (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/grade-configs/{config_id}",
    params(("config_id" = Uuid, Path, description = "Grade configuration ID")),
    request_body = UpdateGradeConfigRequest,
    responses(
        (status = 200, description = "Configuration updated", body = GradeConfigResponse),
        (status = 404, description = "Configuration not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Grade Configurations"
)]
pub async fn update_grade_config(
    AuthClaims(auth_claims): AuthClaims,
    Path(config_id): Path<Uuid>,
    Json(payload): Json<UpdateGradeConfigRequest>,
) -> Result<(StatusCode, Json<GradeConfigResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let updates = GradeConfigUpdate {
        configuration_name: payload.configuration_name,
        calculation_method: payload.calculation_method,
        weight_qa1: payload.weight_qa1,
        weight_qa2: payload.weight_qa2,
        weight_end_of_term: payload.weight_end_of_term,
        pass_mark: payload.pass_mark,
    };

    let config = GradeConfigRepository::new()
        .update(config_id, &ctx, updates)
        .await?;

    Ok((StatusCode::OK, Json(config.into())))
}

/// Activate a configuration (Admin only)
///
/// Deactivates every other configuration in the school and recomputes the
/// cached overall average/grade on all of its report cards.
#[utoipa::path(
    post,
    path = "/api/v1/grade-configs/{config_id}/activate",
    params(("config_id" = Uuid, Path, description = "Grade configuration ID")),
    responses(
        (status = 200, description = "Configuration activated", body = GradeConfigResponse),
        (status = 404, description = "Configuration not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Grade Configurations"
)]
pub async fn activate_grade_config(
    AuthClaims(auth_claims): AuthClaims,
    Path(config_id): Path<Uuid>,
) -> Result<(StatusCode, Json<GradeConfigResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let config = GradeConfigRepository::new().activate(config_id, &ctx).await?;

    Ok((StatusCode::OK, Json(config.into())))
}
