use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{class, student, teacher};
use crate::grading::SubjectScores;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateClassRequest {
    #[schema(example = "Grade 8A")]
    pub name: String,

    #[schema(example = "2024/2025")]
    pub academic_year: String,

    #[schema(example = "Term 1")]
    pub term: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentBrief {
    pub student_id: Uuid,
    pub name: String,
    pub exam_number: String,
}

impl From<student::Model> for StudentBrief {
    fn from(model: student::Model) -> Self {
        Self {
            student_id: model.student_id,
            name: model.name,
            exam_number: model.exam_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassTeacherBrief {
    pub teacher_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<teacher::Model> for ClassTeacherBrief {
    fn from(model: teacher::Model) -> Self {
        Self {
            teacher_id: model.teacher_id,
            name: model.name,
            email: model.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub class_id: Uuid,
    pub name: String,
    pub academic_year: String,
    pub term: String,
    pub class_code: String,
    pub school_id: Option<Uuid>,
    pub class_teacher: Option<ClassTeacherBrief>,
    pub students: Vec<StudentBrief>,
}

impl ClassResponse {
    pub fn from_parts(
        class: class::Model,
        students: Vec<student::Model>,
        class_teacher: Option<teacher::Model>,
    ) -> Self {
        Self {
            class_id: class.class_id,
            name: class.name,
            academic_year: class.academic_year,
            term: class.term,
            class_code: class.class_code,
            school_id: class.school_id,
            class_teacher: class_teacher.map(ClassTeacherBrief::from),
            students: students.into_iter().map(StudentBrief::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassListResponse {
    pub total: usize,
    pub classes: Vec<ClassResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassStudentsResponse {
    pub total: usize,
    pub students: Vec<StudentBrief>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectScoreDto {
    pub name: String,
    pub qa1: f64,
    pub qa2: f64,
    pub end_of_term: f64,
    pub final_score: f64,
    pub grade: String,
}

impl From<SubjectScores> for SubjectScoreDto {
    fn from(scores: SubjectScores) -> Self {
        Self {
            name: scores.name,
            qa1: scores.qa1,
            qa2: scores.qa2,
            end_of_term: scores.end_of_term,
            final_score: scores.final_score,
            grade: scores.grade.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResultRow {
    pub id: Uuid,
    pub name: String,
    pub exam_number: String,
    pub class_rank: i32,
    pub total_score: f64,
    pub average: f64,
    pub overall_grade: String,
    /// Position after sorting this result set by average, 1-based.
    pub rank: usize,
    pub subjects: Vec<SubjectScoreDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResultsResponse {
    pub total: usize,
    pub results: Vec<ClassResultRow>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CalculateRanksRequest {
    #[schema(example = "Term 1")]
    pub term: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateRanksResponse {
    pub message: String,
    pub students_ranked: usize,
}
