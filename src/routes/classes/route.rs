use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{
    CalculateRanksRequest, CalculateRanksResponse, ClassListResponse, ClassResponse,
    ClassResultRow, ClassResultsResponse, ClassStudentsResponse, CreateClassRequest,
    StudentBrief, SubjectScoreDto,
};
use crate::context::RequestContext;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::grading;
use crate::repositories::assessment_repository::assessment_rows;
use crate::repositories::{
    AssessmentRepository, ClassRepository, GradeConfigRepository, ReportCardRepository,
    TeacherRepository,
};
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/classes", post(create_class))
        .route("/api/v1/classes", get(get_all_classes))
        .route("/api/v1/classes/{class_id}", delete(delete_class))
        .route("/api/v1/classes/{class_id}/students", get(get_class_students))
        .route("/api/v1/classes/{class_id}/results", get(get_class_results))
        .route(
            "/api/v1/classes/{class_id}/calculate-ranks",
            post(calculate_ranks),
        )
}

fn require_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin && claims.role != RoleEnum::SchoolAdmin {
        return Err(ServiceError::Forbidden(
            "Only school admin can manage classes".to_string(),
        ));
    }
    Ok(())
}

/// Create a class (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = ClassResponse),
        (status = 409, description = "Class already exists for this year and term"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn create_class(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let class = ClassRepository::new()
        .create(&ctx, payload.name, payload.academic_year, payload.term)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClassResponse::from_parts(class, Vec::new(), None)),
    ))
}

/// List classes with rosters and class teachers
#[utoipa::path(
    get,
    path = "/api/v1/classes",
    responses(
        (status = 200, description = "Classes retrieved", body = ClassListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn get_all_classes(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<ClassListResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let details = ClassRepository::new().find_all_with_details(&ctx).await?;

    let response = ClassListResponse {
        total: details.len(),
        classes: details
            .into_iter()
            .map(|(class, students, class_teacher)| {
                ClassResponse::from_parts(class, students, class_teacher)
            })
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Delete an empty class (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/classes/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Class still has students"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn delete_class(
    AuthClaims(auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    ClassRepository::new().delete(class_id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a class's students
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}/students",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Students retrieved", body = ClassStudentsResponse),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn get_class_students(
    AuthClaims(auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ClassStudentsResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let (_, students) = ClassRepository::new().roster(class_id, &ctx).await?;

    let response = ClassStudentsResponse {
        total: students.len(),
        students: students.into_iter().map(StudentBrief::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Class results under the active grading policy
///
/// Per-student, per-subject final scores for the class's own assessments.
/// Teacher callers see only the subjects they are assigned to teach in
/// this class; the partial-term override does not apply to this view.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}/results",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Results computed", body = ClassResultsResponse),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn get_class_results(
    AuthClaims(auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ClassResultsResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let (class, students) = ClassRepository::new().roster(class_id, &ctx).await?;

    let config = GradeConfigRepository::new()
        .active_or_default(ctx.school_id)
        .await?;
    let policy = config.policy();

    let teacher_subject_ids = match ctx.teacher_id {
        Some(teacher_id) => {
            TeacherRepository::new()
                .subject_ids_for_class(teacher_id, class_id)
                .await?
        }
        None => Vec::new(),
    };

    let assessment_repo = AssessmentRepository::new();
    let report_card_repo = ReportCardRepository::new();
    let mut results: Vec<ClassResultRow> = Vec::new();

    for student in &students {
        let mut pairs = assessment_repo
            .find_by_student_and_class(student.student_id, class_id)
            .await?;

        if ctx.teacher_id.is_some() && !teacher_subject_ids.is_empty() {
            pairs.retain(|(assessment, _)| teacher_subject_ids.contains(&assessment.subject_id));
        }

        let rows = assessment_rows(&pairs);
        let triples = grading::subject_triples(&rows);
        if triples.is_empty() {
            continue;
        }

        let scored = grading::score_subjects(&triples, &policy, None);

        let total_score: f64 = scored.iter().map(|s| s.final_score).sum();
        let average = total_score / scored.len() as f64;

        let report_card = report_card_repo
            .find_by_student_and_term(student.student_id, &class.term, &ctx)
            .await?;

        results.push(ClassResultRow {
            id: student.student_id,
            name: student.name.clone(),
            exam_number: student.exam_number.clone(),
            class_rank: report_card.map(|r| r.class_rank).unwrap_or(0),
            total_score,
            average,
            overall_grade: grading::letter_grade(average, &policy).to_string(),
            rank: 0,
            subjects: scored.into_iter().map(SubjectScoreDto::from).collect(),
        });
    }

    results.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index + 1;
    }

    let response = ClassResultsResponse {
        total: results.len(),
        results,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Recalculate QA1/QA2/end-of-term class rankings for a term
#[utoipa::path(
    post,
    path = "/api/v1/classes/{class_id}/calculate-ranks",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    request_body = CalculateRanksRequest,
    responses(
        (status = 200, description = "Ranks calculated", body = CalculateRanksResponse),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn calculate_ranks(
    AuthClaims(auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<CalculateRanksRequest>,
) -> Result<(StatusCode, Json<CalculateRanksResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let students_ranked = ReportCardRepository::new()
        .calculate_and_update_ranks(class_id, &payload.term, &ctx)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CalculateRanksResponse {
            message: "Ranks calculated and updated successfully".to_string(),
            students_ranked,
        }),
    ))
}
