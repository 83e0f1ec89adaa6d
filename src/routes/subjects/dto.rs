use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::subject;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSubjectRequest {
    #[schema(example = "Mathematics")]
    pub name: String,

    #[schema(example = "Core mathematics syllabus")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub subject_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<subject::Model> for SubjectResponse {
    fn from(model: subject::Model) -> Self {
        Self {
            subject_id: model.subject_id,
            name: model.name,
            description: model.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectResponse>,
}
