use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{class, student, subject, teacher, teacher_class_subject};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTeacherRequest {
    #[schema(example = "John Okello")]
    pub name: String,

    #[schema(example = "j.okello@greenhill.edu")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,

    /// Required for super-admin calls; school admins use their own school.
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SchoolScopeQuery {
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub teacher_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<teacher::Model> for TeacherResponse {
    fn from(model: teacher::Model) -> Self {
        Self {
            teacher_id: model.teacher_id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherListResponse {
    pub total: usize,
    pub teachers: Vec<TeacherResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AssignmentRequest {
    pub teacher_id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub assignment_id: Uuid,
    pub teacher_id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}

impl From<teacher_class_subject::Model> for AssignmentResponse {
    fn from(model: teacher_class_subject::Model) -> Self {
        Self {
            assignment_id: model.assignment_id,
            teacher_id: model.teacher_id,
            class_id: model.class_id,
            subject_id: model.subject_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentListResponse {
    pub total: usize,
    pub assignments: Vec<AssignmentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherClassResponse {
    pub class_id: Uuid,
    pub name: String,
    pub academic_year: String,
    pub term: String,
    pub class_code: String,
}

impl From<class::Model> for TeacherClassResponse {
    fn from(model: class::Model) -> Self {
        Self {
            class_id: model.class_id,
            name: model.name,
            academic_year: model.academic_year,
            term: model.term,
            class_code: model.class_code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherSubjectResponse {
    pub subject_id: Uuid,
    pub name: String,
}

impl From<subject::Model> for TeacherSubjectResponse {
    fn from(model: subject::Model) -> Self {
        Self {
            subject_id: model.subject_id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherStudentResponse {
    pub student_id: Uuid,
    pub name: String,
    pub exam_number: String,
    pub class_id: Option<Uuid>,
}

impl From<student::Model> for TeacherStudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            student_id: model.student_id,
            name: model.name,
            exam_number: model.exam_number,
            class_id: model.class_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClassTeacherRequest {
    pub teacher_id: Uuid,
    pub class_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassTeacherResponse {
    pub message: String,
    pub teacher_id: Uuid,
    pub teacher_name: String,
    pub class_id: Uuid,
    pub class_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
