use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::dto::{CreateSchoolRequest, SchoolListResponse, SchoolResponse, UpdateSchoolRequest};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{SchoolRepository, SchoolUpdate};
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/schools", post(create_school))
        .route("/api/v1/schools", get(get_all_schools))
        .route("/api/v1/schools/{school_id}", get(get_school))
        .route("/api/v1/schools/{school_id}", put(update_school))
        .route("/api/v1/schools/{school_id}", delete(deactivate_school))
        .route("/api/v1/schools/{school_id}/restore", post(restore_school))
        .route(
            "/api/v1/schools/{school_id}/permanent",
            delete(delete_school_permanently),
        )
}

fn require_super_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin {
        return Err(ServiceError::Forbidden(
            "Only super admin can manage schools".to_string(),
        ));
    }
    Ok(())
}

/// Register a new school with its admin credentials (Super admin only)
#[utoipa::path(
    post,
    path = "/api/v1/schools",
    request_body = CreateSchoolRequest,
    responses(
        (status = 201, description = "School created", body = SchoolResponse),
        (status = 403, description = "Forbidden - Super admin only"),
        (status = 409, description = "School or admin email already in use"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn create_school(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<SchoolResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let school = SchoolRepository::new()
        .create(
            payload.name,
            payload.email,
            payload.phone,
            payload.address,
            payload.admin_email,
            payload.admin_password,
            payload.admin_name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(school.into())))
}

/// List all schools (Super admin only)
#[utoipa::path(
    get,
    path = "/api/v1/schools",
    responses(
        (status = 200, description = "Schools retrieved", body = SchoolListResponse),
        (status = 403, description = "Forbidden - Super admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn get_all_schools(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<SchoolListResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let schools = SchoolRepository::new().find_all().await?;

    let response = SchoolListResponse {
        total: schools.len(),
        schools: schools.into_iter().map(SchoolResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get one school (Super admin only)
#[utoipa::path(
    get,
    path = "/api/v1/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School retrieved", body = SchoolResponse),
        (status = 404, description = "School not found"),
        (status = 403, description = "Forbidden - Super admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn get_school(
    AuthClaims(auth_claims): AuthClaims,
    Path(school_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SchoolResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let school = SchoolRepository::new().find_by_id(school_id).await?;
    Ok((StatusCode::OK, Json(school.into())))
}

/// Update school details (Super admin only)
#[utoipa::path(
    put,
    path = "/api/v1/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    request_body = UpdateSchoolRequest,
    responses(
        (status = 200, description = "School updated", body = SchoolResponse),
        (status = 404, description = "School not found"),
        (status = 403, description = "Forbidden - Super admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn update_school(
    AuthClaims(auth_claims): AuthClaims,
    Path(school_id): Path<Uuid>,
    Json(payload): Json<UpdateSchoolRequest>,
) -> Result<(StatusCode, Json<SchoolResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let updates = SchoolUpdate {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
        admin_name: payload.admin_name,
    };

    let school = SchoolRepository::new().update(school_id, updates).await?;
    Ok((StatusCode::OK, Json(school.into())))
}

/// Deactivate a school (soft delete, Super admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School deactivated", body = SchoolResponse),
        (status = 404, description = "School not found"),
        (status = 403, description = "Forbidden - Super admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn deactivate_school(
    AuthClaims(auth_claims): AuthClaims,
    Path(school_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SchoolResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let school = SchoolRepository::new().deactivate(school_id).await?;
    Ok((StatusCode::OK, Json(school.into())))
}

/// Restore a deactivated school (Super admin only)
#[utoipa::path(
    post,
    path = "/api/v1/schools/{school_id}/restore",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School restored", body = SchoolResponse),
        (status = 404, description = "School not found"),
        (status = 403, description = "Forbidden - Super admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn restore_school(
    AuthClaims(auth_claims): AuthClaims,
    Path(school_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SchoolResponse>), ServiceError> {
    require_super_admin(&auth_claims)?;

    let school = SchoolRepository::new().restore(school_id).await?;
    Ok((StatusCode::OK, Json(school.into())))
}

/// Permanently delete a school and everything it owns (Super admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/schools/{school_id}/permanent",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 204, description = "School permanently deleted"),
        (status = 404, description = "School not found"),
        (status = 403, description = "Forbidden - Super admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
pub async fn delete_school_permanently(
    AuthClaims(auth_claims): AuthClaims,
    Path(school_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    require_super_admin(&auth_claims)?;

    SchoolRepository::new().delete_permanently(school_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
