use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{CreateSubjectRequest, SubjectListResponse, SubjectResponse};
use crate::context::RequestContext;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::SubjectRepository;
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/subjects", post(create_subject))
        .route("/api/v1/subjects", get(get_all_subjects))
        .route("/api/v1/subjects/{subject_id}", delete(delete_subject))
}

fn require_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin && claims.role != RoleEnum::SchoolAdmin {
        return Err(ServiceError::Forbidden(
            "Only school admin can manage subjects".to_string(),
        ));
    }
    Ok(())
}

/// Create a subject (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 409, description = "Subject already exists"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let subject = SubjectRepository::new()
        .create(&ctx, payload.name, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// List subjects alphabetically
#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    responses(
        (status = 200, description = "Subjects retrieved", body = SubjectListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_all_subjects(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<SubjectListResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let subjects = SubjectRepository::new().find_all(&ctx).await?;

    let response = SubjectListResponse {
        total: subjects.len(),
        subjects: subjects.into_iter().map(SubjectResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Delete a subject (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn delete_subject(
    AuthClaims(auth_claims): AuthClaims,
    Path(subject_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    SubjectRepository::new().delete(subject_id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
