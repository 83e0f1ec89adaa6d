use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{AssessmentResponse, UpsertAssessmentRequest, UpsertAssessmentResponse};
use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{AssessmentRepository, ScoreWrite, UpsertOutcome};

pub fn create_route() -> Router {
    Router::new().route("/api/v1/assessments/upsert", post(upsert_assessment))
}

/// Record, replace or remove one score
///
/// A score of 0 deletes the stored assessment for the
/// (student, subject, kind, class) slot instead of storing a zero.
#[utoipa::path(
    post,
    path = "/api/v1/assessments/upsert",
    request_body = UpsertAssessmentRequest,
    responses(
        (status = 200, description = "Assessment saved or deleted", body = UpsertAssessmentResponse),
        (status = 400, description = "Score out of range"),
        (status = 404, description = "Student not found or not in a class"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn upsert_assessment(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<UpsertAssessmentRequest>,
) -> Result<(StatusCode, Json<UpsertAssessmentResponse>), ServiceError> {
    if !(0..=100).contains(&payload.score) {
        return Err(ServiceError::Validation(
            "Score must be between 0 and 100".to_string(),
        ));
    }

    let ctx = RequestContext::from_claims(&auth_claims);
    let write = ScoreWrite::from_raw(payload.score);

    let outcome = AssessmentRepository::new()
        .upsert(
            &ctx,
            payload.student_id,
            payload.subject_id,
            payload.assessment_type,
            write,
        )
        .await?;

    let response = match outcome {
        UpsertOutcome::Deleted => UpsertAssessmentResponse {
            deleted: true,
            assessment: None,
        },
        UpsertOutcome::Saved(model) => UpsertAssessmentResponse {
            deleted: false,
            assessment: Some(AssessmentResponse::from(model)),
        },
    };

    Ok((StatusCode::OK, Json(response)))
}
