use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{
    AssignmentListResponse, AssignmentRequest, AssignmentResponse, ClassTeacherRequest,
    ClassTeacherResponse, CreateTeacherRequest, MessageResponse, SchoolScopeQuery,
    TeacherClassResponse, TeacherListResponse, TeacherResponse, TeacherStudentResponse,
    TeacherSubjectResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::TeacherRepository;
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/teachers", post(create_teacher))
        .route("/api/v1/teachers", get(get_teachers))
        .route("/api/v1/teachers/{teacher_id}", delete(delete_teacher))
        .route("/api/v1/teachers/assignments", post(assign_teacher))
        .route("/api/v1/teachers/assignments", delete(remove_assignment))
        .route(
            "/api/v1/teachers/{teacher_id}/assignments",
            get(get_teacher_assignments),
        )
        .route(
            "/api/v1/teachers/{teacher_id}/classes",
            get(get_teacher_classes),
        )
        .route(
            "/api/v1/teachers/{teacher_id}/subjects",
            get(get_teacher_subjects),
        )
        .route(
            "/api/v1/teachers/{teacher_id}/students",
            get(get_teacher_students),
        )
        .route("/api/v1/teachers/class-teacher", post(assign_class_teacher))
        .route(
            "/api/v1/teachers/class-teacher/{class_id}",
            delete(remove_class_teacher),
        )
        .route(
            "/api/v1/teachers/class-teacher/{class_id}",
            get(get_class_teacher),
        )
}

fn require_admin(claims: &TokenClaims) -> Result<(), ServiceError> {
    if claims.role != RoleEnum::SuperAdmin && claims.role != RoleEnum::SchoolAdmin {
        return Err(ServiceError::Forbidden(
            "Only school admin can manage teachers".to_string(),
        ));
    }
    Ok(())
}

/// School admins act on their own school; super admins must name one.
fn resolve_school_id(
    claims: &TokenClaims,
    explicit: Option<Uuid>,
) -> Result<Uuid, ServiceError> {
    claims
        .school_id
        .or(explicit)
        .ok_or_else(|| ServiceError::Validation("School ID is required".to_string()))
}

/// Create a teacher account (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn create_teacher(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let school_id = resolve_school_id(&auth_claims, payload.school_id)?;

    let teacher = TeacherRepository::new()
        .create(school_id, payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(teacher.into())))
}

/// List the school's teachers
#[utoipa::path(
    get,
    path = "/api/v1/teachers",
    params(("school_id" = Option<Uuid>, Query, description = "School ID (super admin only)")),
    responses(
        (status = 200, description = "Teachers retrieved", body = TeacherListResponse),
        (status = 400, description = "School ID is required"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teachers(
    AuthClaims(auth_claims): AuthClaims,
    Query(query): Query<SchoolScopeQuery>,
) -> Result<(StatusCode, Json<TeacherListResponse>), ServiceError> {
    let school_id = resolve_school_id(&auth_claims, query.school_id)?;

    let teachers = TeacherRepository::new().find_by_school(school_id).await?;

    let response = TeacherListResponse {
        total: teachers.len(),
        teachers: teachers.into_iter().map(TeacherResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Delete a teacher (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/teachers/{teacher_id}",
    params(
        ("teacher_id" = Uuid, Path, description = "Teacher ID"),
        ("school_id" = Option<Uuid>, Query, description = "School ID (super admin only)")
    ),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 404, description = "Teacher not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    AuthClaims(auth_claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
    Query(query): Query<SchoolScopeQuery>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    require_admin(&auth_claims)?;
    let school_id = resolve_school_id(&auth_claims, query.school_id)?;

    TeacherRepository::new().delete(teacher_id, school_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Teacher deleted successfully".to_string(),
        }),
    ))
}

/// Assign a teacher to teach a subject in a class (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/teachers/assignments",
    request_body = AssignmentRequest,
    responses(
        (status = 201, description = "Teacher assigned", body = AssignmentResponse),
        (status = 404, description = "Teacher, class or subject not found"),
        (status = 409, description = "Assignment already exists"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn assign_teacher(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<AssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ServiceError> {
    require_admin(&auth_claims)?;

    let assignment = TeacherRepository::new()
        .assign_class_subject(payload.teacher_id, payload.class_id, payload.subject_id)
        .await?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}

/// Remove a teaching assignment (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/teachers/assignments",
    request_body = AssignmentRequest,
    responses(
        (status = 200, description = "Assignment removed", body = MessageResponse),
        (status = 404, description = "Assignment not found"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn remove_assignment(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<AssignmentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    require_admin(&auth_claims)?;

    TeacherRepository::new()
        .remove_assignment(payload.teacher_id, payload.class_id, payload.subject_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Assignment removed successfully".to_string(),
        }),
    ))
}

/// List a teacher's class/subject assignments
#[utoipa::path(
    get,
    path = "/api/v1/teachers/{teacher_id}/assignments",
    params(("teacher_id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Assignments retrieved", body = AssignmentListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_assignments(
    AuthClaims(_auth_claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<(StatusCode, Json<AssignmentListResponse>), ServiceError> {
    let assignments = TeacherRepository::new().assignments(teacher_id).await?;

    let response = AssignmentListResponse {
        total: assignments.len(),
        assignments: assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// List the distinct classes a teacher is assigned to
#[utoipa::path(
    get,
    path = "/api/v1/teachers/{teacher_id}/classes",
    params(("teacher_id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Classes retrieved", body = [TeacherClassResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_classes(
    AuthClaims(_auth_claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<TeacherClassResponse>>), ServiceError> {
    let classes = TeacherRepository::new().classes(teacher_id).await?;
    Ok((
        StatusCode::OK,
        Json(classes.into_iter().map(TeacherClassResponse::from).collect()),
    ))
}

/// List the distinct subjects a teacher is assigned to
#[utoipa::path(
    get,
    path = "/api/v1/teachers/{teacher_id}/subjects",
    params(("teacher_id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Subjects retrieved", body = [TeacherSubjectResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_subjects(
    AuthClaims(_auth_claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<TeacherSubjectResponse>>), ServiceError> {
    let subjects = TeacherRepository::new().subjects(teacher_id).await?;
    Ok((
        StatusCode::OK,
        Json(
            subjects
                .into_iter()
                .map(TeacherSubjectResponse::from)
                .collect(),
        ),
    ))
}

/// List students across all classes a teacher is assigned to
#[utoipa::path(
    get,
    path = "/api/v1/teachers/{teacher_id}/students",
    params(("teacher_id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Students retrieved", body = [TeacherStudentResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_students(
    AuthClaims(_auth_claims): AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<TeacherStudentResponse>>), ServiceError> {
    let students = TeacherRepository::new().students(teacher_id).await?;
    Ok((
        StatusCode::OK,
        Json(
            students
                .into_iter()
                .map(TeacherStudentResponse::from)
                .collect(),
        ),
    ))
}

/// Designate a teacher as the class teacher for a class (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/teachers/class-teacher",
    request_body = ClassTeacherRequest,
    responses(
        (status = 200, description = "Class teacher assigned", body = ClassTeacherResponse),
        (status = 404, description = "Teacher or class not found"),
        (status = 409, description = "Teacher already class teacher for this class"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn assign_class_teacher(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<ClassTeacherRequest>,
) -> Result<(StatusCode, Json<ClassTeacherResponse>), ServiceError> {
    require_admin(&auth_claims)?;

    let (teacher, class) = TeacherRepository::new()
        .assign_class_teacher(payload.teacher_id, payload.class_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ClassTeacherResponse {
            message: "Class teacher assigned successfully".to_string(),
            teacher_id: teacher.teacher_id,
            teacher_name: teacher.name,
            class_id: class.class_id,
            class_name: class.name,
        }),
    ))
}

/// Remove the class teacher from a class (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/teachers/class-teacher/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class teacher removed", body = MessageResponse),
        (status = 404, description = "Class not found or no class teacher assigned"),
        (status = 403, description = "Forbidden - Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn remove_class_teacher(
    AuthClaims(auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    require_admin(&auth_claims)?;

    TeacherRepository::new().remove_class_teacher(class_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Class teacher removed successfully".to_string(),
        }),
    ))
}

/// Get the class teacher of a class
#[utoipa::path(
    get,
    path = "/api/v1/teachers/class-teacher/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class teacher retrieved, null when none assigned", body = TeacherResponse),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_class_teacher(
    AuthClaims(_auth_claims): AuthClaims,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Option<TeacherResponse>>), ServiceError> {
    let teacher = TeacherRepository::new().class_teacher(class_id).await?;
    Ok((StatusCode::OK, Json(teacher.map(TeacherResponse::from))))
}
