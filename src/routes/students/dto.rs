use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{AssessmentKind, CalculationMethod};
use crate::entities::{assessment, student, subject};
use crate::routes::classes::dto::SubjectScoreDto;
use crate::routes::grade_configs::dto::GradeConfigResponse;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Amina Nakato")]
    pub name: String,

    pub class_id: Uuid,

    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: Uuid,
    pub exam_number: String,
    pub name: String,
    pub class_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub school_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            student_id: model.student_id,
            exam_number: model.exam_number,
            name: model.name,
            class_id: model.class_id,
            photo_url: model.photo_url,
            school_id: model.school_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectBrief {
    pub subject_id: Uuid,
    pub name: String,
}

impl From<subject::Model> for SubjectBrief {
    fn from(model: subject::Model) -> Self {
        Self {
            subject_id: model.subject_id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAssessmentResponse {
    pub assessment_id: Uuid,
    pub subject: Option<SubjectBrief>,
    pub assessment_type: AssessmentKind,
    pub score: i32,
    pub grade: String,
}

impl From<(assessment::Model, Option<subject::Model>)> for StudentAssessmentResponse {
    fn from((model, subject): (assessment::Model, Option<subject::Model>)) -> Self {
        Self {
            assessment_id: model.assessment_id,
            subject: subject.map(SubjectBrief::from),
            assessment_type: model.assessment_type,
            score: model.score,
            grade: model.grade,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAssessmentListResponse {
    pub total: usize,
    pub assessments: Vec<StudentAssessmentResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceDto {
    pub present: i32,
    pub absent: i32,
    pub late: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KindStatDto {
    pub class_rank: i32,
    pub term_average: f64,
    pub overall_grade: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndOfTermStatDto {
    pub class_rank: i32,
    pub term_average: f64,
    pub overall_grade: String,
    pub attendance: AttendanceDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverallStatDto {
    pub term_average: f64,
    pub calculation_method: CalculationMethod,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentStatsDto {
    pub qa1: KindStatDto,
    pub qa2: KindStatDto,
    pub end_of_term: EndOfTermStatDto,
    pub overall: OverallStatDto,
}

/// The student-facing report card payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentReportResponse {
    pub id: Uuid,
    pub name: String,
    pub exam_number: String,
    pub class: String,
    pub term: String,
    pub academic_year: String,
    pub photo: String,
    pub subjects: Vec<SubjectScoreDto>,
    pub attendance: AttendanceDto,
    pub class_rank: i32,
    pub qa1_rank: i32,
    pub qa2_rank: i32,
    pub total_students: i32,
    pub teacher_remarks: String,
    pub grade_configuration: GradeConfigResponse,
    pub assessment_stats: AssessmentStatsDto,
}
