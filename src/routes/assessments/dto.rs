use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::assessment;
use crate::entities::sea_orm_active_enums::AssessmentKind;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpsertAssessmentRequest {
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub assessment_type: AssessmentKind,

    /// 1-100 stores the score; 0 removes any stored score for this slot.
    #[schema(minimum = 0, maximum = 100, example = 85)]
    pub score: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub assessment_id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub class_id: Uuid,
    pub assessment_type: AssessmentKind,
    pub score: i32,
    pub grade: String,
}

impl From<assessment::Model> for AssessmentResponse {
    fn from(model: assessment::Model) -> Self {
        Self {
            assessment_id: model.assessment_id,
            student_id: model.student_id,
            subject_id: model.subject_id,
            class_id: model.class_id,
            assessment_type: model.assessment_type,
            score: model.score,
            grade: model.grade,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpsertAssessmentResponse {
    pub deleted: bool,
    pub assessment: Option<AssessmentResponse>,
}
