use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{ReportCardResponse, UpsertReportCardRequest};
use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{ReportCardRepository, ReportCardUpsert};

pub fn create_route() -> Router {
    Router::new().route("/api/v1/report-cards/upsert", post(upsert_report_card))
}

/// Write attendance, remarks and optional rank overrides
///
/// Teacher-originated calls must come from the class's designated class
/// teacher; admin calls carry no teacher identity and bypass that check.
#[utoipa::path(
    post,
    path = "/api/v1/report-cards/upsert",
    request_body = UpsertReportCardRequest,
    responses(
        (status = 200, description = "Report card saved", body = ReportCardResponse),
        (status = 403, description = "Only class teacher can update attendance and remarks"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Report Cards"
)]
pub async fn upsert_report_card(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<UpsertReportCardRequest>,
) -> Result<(StatusCode, Json<ReportCardResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let saved = ReportCardRepository::new()
        .upsert(
            &ctx,
            ReportCardUpsert {
                student_id: payload.student_id,
                term: payload.term,
                days_present: payload.days_present,
                days_absent: payload.days_absent,
                days_late: payload.days_late,
                teacher_remarks: payload.teacher_remarks,
                class_rank: payload.class_rank,
                qa1_rank: payload.qa1_rank,
                qa2_rank: payload.qa2_rank,
                total_students: payload.total_students,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(saved.into())))
}
