use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health_check,
        routes::auth::route::login,
        routes::auth::route::change_password,
        routes::schools::route::create_school,
        routes::schools::route::get_all_schools,
        routes::schools::route::get_school,
        routes::schools::route::update_school,
        routes::schools::route::deactivate_school,
        routes::schools::route::restore_school,
        routes::schools::route::delete_school_permanently,
        routes::teachers::route::create_teacher,
        routes::teachers::route::get_teachers,
        routes::teachers::route::delete_teacher,
        routes::teachers::route::assign_teacher,
        routes::teachers::route::remove_assignment,
        routes::teachers::route::get_teacher_assignments,
        routes::teachers::route::get_teacher_classes,
        routes::teachers::route::get_teacher_subjects,
        routes::teachers::route::get_teacher_students,
        routes::teachers::route::assign_class_teacher,
        routes::teachers::route::remove_class_teacher,
        routes::teachers::route::get_class_teacher,
        routes::classes::route::create_class,
        routes::classes::route::get_all_classes,
        routes::classes::route::delete_class,
        routes::classes::route::get_class_students,
        routes::classes::route::get_class_results,
        routes::classes::route::calculate_ranks,
        routes::subjects::route::create_subject,
        routes::subjects::route::get_all_subjects,
        routes::subjects::route::delete_subject,
        routes::students::route::create_student,
        routes::students::route::get_all_students,
        routes::students::route::update_student,
        routes::students::route::delete_student,
        routes::students::route::get_student_assessments,
        routes::students::route::get_student_report_card,
        routes::students::route::get_student_results,
        routes::assessments::route::upsert_assessment,
        routes::report_cards::route::upsert_report_card,
        routes::grade_configs::route::get_active_grade_config,
        routes::grade_configs::route::get_all_grade_configs,
        routes::grade_configs::route::create_grade_config,
        routes::grade_configs::route::update_grade_config,
        routes::grade_configs::route::activate_grade_config,
    ),
    components(schemas(
        crate::entities::sea_orm_active_enums::RoleEnum,
        crate::entities::sea_orm_active_enums::AssessmentKind,
        crate::entities::sea_orm_active_enums::CalculationMethod,
        routes::auth::dto::LoginRequest,
        routes::auth::dto::LoginResponse,
        routes::auth::dto::AuthenticatedUser,
        routes::auth::dto::ChangePasswordRequest,
        routes::auth::dto::ChangePasswordResponse,
        routes::schools::dto::CreateSchoolRequest,
        routes::schools::dto::UpdateSchoolRequest,
        routes::schools::dto::SchoolResponse,
        routes::schools::dto::SchoolListResponse,
        routes::teachers::dto::CreateTeacherRequest,
        routes::teachers::dto::TeacherResponse,
        routes::teachers::dto::TeacherListResponse,
        routes::teachers::dto::AssignmentRequest,
        routes::teachers::dto::AssignmentResponse,
        routes::teachers::dto::AssignmentListResponse,
        routes::teachers::dto::TeacherClassResponse,
        routes::teachers::dto::TeacherSubjectResponse,
        routes::teachers::dto::TeacherStudentResponse,
        routes::teachers::dto::ClassTeacherRequest,
        routes::teachers::dto::ClassTeacherResponse,
        routes::teachers::dto::MessageResponse,
        routes::classes::dto::CreateClassRequest,
        routes::classes::dto::ClassResponse,
        routes::classes::dto::ClassListResponse,
        routes::classes::dto::ClassStudentsResponse,
        routes::classes::dto::StudentBrief,
        routes::classes::dto::ClassTeacherBrief,
        routes::classes::dto::SubjectScoreDto,
        routes::classes::dto::ClassResultRow,
        routes::classes::dto::ClassResultsResponse,
        routes::classes::dto::CalculateRanksRequest,
        routes::classes::dto::CalculateRanksResponse,
        routes::subjects::dto::CreateSubjectRequest,
        routes::subjects::dto::SubjectResponse,
        routes::subjects::dto::SubjectListResponse,
        routes::students::dto::CreateStudentRequest,
        routes::students::dto::UpdateStudentRequest,
        routes::students::dto::StudentResponse,
        routes::students::dto::StudentListResponse,
        routes::students::dto::SubjectBrief,
        routes::students::dto::StudentAssessmentResponse,
        routes::students::dto::StudentAssessmentListResponse,
        routes::students::dto::AttendanceDto,
        routes::students::dto::KindStatDto,
        routes::students::dto::EndOfTermStatDto,
        routes::students::dto::OverallStatDto,
        routes::students::dto::AssessmentStatsDto,
        routes::students::dto::StudentReportResponse,
        routes::assessments::dto::UpsertAssessmentRequest,
        routes::assessments::dto::AssessmentResponse,
        routes::assessments::dto::UpsertAssessmentResponse,
        routes::report_cards::dto::UpsertReportCardRequest,
        routes::report_cards::dto::ReportCardResponse,
        routes::grade_configs::dto::CreateGradeConfigRequest,
        routes::grade_configs::dto::UpdateGradeConfigRequest,
        routes::grade_configs::dto::GradeConfigResponse,
        routes::grade_configs::dto::GradeConfigListResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login and password management"),
        (name = "Schools", description = "Tenant administration"),
        (name = "Teachers", description = "Teacher accounts and assignments"),
        (name = "Classes", description = "Classes, rosters, results and rankings"),
        (name = "Subjects", description = "Subject catalogue"),
        (name = "Students", description = "Students and report payloads"),
        (name = "Assessments", description = "Score entry"),
        (name = "Report Cards", description = "Attendance and remarks"),
        (name = "Grade Configurations", description = "Grading policies"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
