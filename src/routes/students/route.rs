use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::dto::{
    AssessmentStatsDto, AttendanceDto, CreateStudentRequest, EndOfTermStatDto, KindStatDto,
    OverallStatDto, StudentAssessmentListResponse, StudentAssessmentResponse, StudentListResponse,
    StudentReportResponse, StudentResponse, UpdateStudentRequest,
};
use crate::context::RequestContext;
use crate::entities::class;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::grading;
use crate::repositories::assessment_repository::assessment_rows;
use crate::repositories::{
    AssessmentRepository, GradeConfigRepository, ReportCardRepository, StudentRepository,
    StudentUpdate,
};
use crate::routes::classes::dto::SubjectScoreDto;
use crate::routes::report_cards::dto::ReportCardResponse;
use crate::utils::jwt::TokenClaims;

const DEFAULT_PHOTO_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=default";

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/students", post(create_student))
        .route("/api/v1/students", get(get_all_students))
        .route("/api/v1/students/{student_id}", put(update_student))
        .route("/api/v1/students/{student_id}", delete(delete_student))
        .route(
            "/api/v1/students/{student_id}/assessments",
            get(get_student_assessments),
        )
        .route(
            "/api/v1/students/{student_id}/report-cards/{term}",
            get(get_student_report_card),
        )
        .route(
            "/api/v1/students/results/{exam_number}",
            get(get_student_results),
        )
}

fn require_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin && claims.role != RoleEnum::SchoolAdmin {
        return Err(ServiceError::Forbidden(
            "Only school admin can manage students".to_string(),
        ));
    }
    Ok(())
}

/// Enroll a student; the exam number is generated here (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 404, description = "Class not found in your school"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let student = StudentRepository::new()
        .create(&ctx, payload.name, payload.class_id, payload.photo_url)
        .await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// List students ordered by exam number
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_all_students(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<StudentListResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let students = StudentRepository::new().find_all(&ctx).await?;

    let response = StudentListResponse {
        total: students.len(),
        students: students.into_iter().map(StudentResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Update a student's name, photo or class (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student or class not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn update_student(
    AuthClaims(auth_claims): AuthClaims,
    Path(student_id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    let updates = StudentUpdate {
        name: payload.name,
        photo_url: payload.photo_url,
        class_id: payload.class_id,
    };

    let student = StudentRepository::new()
        .update(student_id, &ctx, updates)
        .await?;

    Ok((StatusCode::OK, Json(student.into())))
}

/// Delete a student and everything they own (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    AuthClaims(auth_claims): AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    require_admin(&auth_claims)?;
    let ctx = RequestContext::from_claims(&auth_claims);

    StudentRepository::new().remove(student_id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a student's raw assessments with subjects
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}/assessments",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Assessments retrieved", body = StudentAssessmentListResponse),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student_assessments(
    AuthClaims(auth_claims): AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StudentAssessmentListResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    // Tenant check on the student row before exposing its assessments
    StudentRepository::new().find_by_id(student_id, &ctx).await?;

    let pairs = AssessmentRepository::new().find_by_student(student_id).await?;

    let response = StudentAssessmentListResponse {
        total: pairs.len(),
        assessments: pairs
            .into_iter()
            .map(StudentAssessmentResponse::from)
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get a student's report card for one term
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}/report-cards/{term}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("term" = String, Path, description = "Term, e.g. \"Term 1\"")
    ),
    responses(
        (status = 200, description = "Report card retrieved", body = ReportCardResponse),
        (status = 404, description = "Report card not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student_report_card(
    AuthClaims(auth_claims): AuthClaims,
    Path((student_id, term)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<ReportCardResponse>), ServiceError> {
    let ctx = RequestContext::from_claims(&auth_claims);

    let report_card = ReportCardRepository::new()
        .find_by_student_and_term(student_id, &term, &ctx)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Report card not found".to_string()))?;

    Ok((StatusCode::OK, Json(report_card.into())))
}

/// Full report-card payload by exam number
///
/// Formatted subjects under the active policy (with the partial-term
/// override), attendance, ranks, remarks, the policy echo and the
/// per-kind assessment statistics.
#[utoipa::path(
    get,
    path = "/api/v1/students/results/{exam_number}",
    params(("exam_number" = String, Path, description = "Student exam number")),
    responses(
        (status = 200, description = "Report payload", body = StudentReportResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student_results(
    AuthClaims(_auth_claims): AuthClaims,
    Path(exam_number): Path<String>,
) -> Result<(StatusCode, Json<StudentReportResponse>), ServiceError> {
    let student_repo = StudentRepository::new();
    let student = student_repo.find_by_exam_number(&exam_number).await?;

    // The policy comes from the student's own school, not the caller's
    let config = GradeConfigRepository::new()
        .active_or_default(student.school_id)
        .await?;
    let policy = config.policy();

    let pairs = AssessmentRepository::new()
        .find_by_student(student.student_id)
        .await?;
    let rows = assessment_rows(&pairs);
    let triples = grading::subject_triples(&rows);
    let presence = grading::term_presence(&rows);
    let scored = grading::score_subjects(&triples, &policy, Some(presence));

    let report_cards = student_repo.report_cards(student.student_id).await?;
    let active_report = report_cards.into_iter().next();

    let class_entity = match student.class_id {
        Some(class_id) => {
            class::Entity::find()
                .filter(class::Column::ClassId.eq(class_id))
                .one(student_repo.get_connection())
                .await?
        }
        None => None,
    };

    let (class_name, term, academic_year) = match &class_entity {
        Some(c) => (c.name.clone(), c.term.clone(), c.academic_year.clone()),
        None => (
            "Unknown".to_string(),
            "Term 1, 2024/2025".to_string(),
            "2024/2025".to_string(),
        ),
    };

    let attendance = AttendanceDto {
        present: active_report.as_ref().map(|r| r.days_present).unwrap_or(0),
        absent: active_report.as_ref().map(|r| r.days_absent).unwrap_or(0),
        late: active_report.as_ref().map(|r| r.days_late).unwrap_or(0),
    };

    let class_rank = active_report.as_ref().map(|r| r.class_rank).unwrap_or(0);
    let qa1_rank = active_report.as_ref().map(|r| r.qa1_rank).unwrap_or(0);
    let qa2_rank = active_report.as_ref().map(|r| r.qa2_rank).unwrap_or(0);
    let total_students = active_report
        .as_ref()
        .map(|r| r.total_students)
        .unwrap_or(0);
    let teacher_remarks = active_report
        .as_ref()
        .filter(|r| !r.teacher_remarks.is_empty())
        .map(|r| r.teacher_remarks.clone())
        .unwrap_or_else(|| "No remarks available.".to_string());

    let stats = grading::assessment_stats(&triples, &policy);
    let assessment_stats = AssessmentStatsDto {
        qa1: KindStatDto {
            class_rank: qa1_rank,
            term_average: grading::round1(stats.qa1.term_average),
            overall_grade: stats.qa1.grade.to_string(),
        },
        qa2: KindStatDto {
            class_rank: qa2_rank,
            term_average: grading::round1(stats.qa2.term_average),
            overall_grade: stats.qa2.grade.to_string(),
        },
        end_of_term: EndOfTermStatDto {
            class_rank,
            term_average: grading::round1(stats.end_of_term.term_average),
            overall_grade: stats.end_of_term.grade.to_string(),
            attendance: attendance.clone(),
        },
        overall: OverallStatDto {
            term_average: grading::round1(stats.overall_average),
            calculation_method: config.calculation_method.clone(),
        },
    };

    let response = StudentReportResponse {
        id: student.student_id,
        name: student.name,
        exam_number: student.exam_number,
        class: class_name,
        term,
        academic_year,
        photo: student
            .photo_url
            .unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string()),
        subjects: scored.into_iter().map(SubjectScoreDto::from).collect(),
        attendance,
        class_rank,
        qa1_rank,
        qa2_rank,
        total_students,
        teacher_remarks,
        grade_configuration: config.into(),
        assessment_stats,
    };

    Ok((StatusCode::OK, Json(response)))
}
