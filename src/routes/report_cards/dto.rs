use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::report_card;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpsertReportCardRequest {
    pub student_id: Uuid,

    #[schema(example = "Term 1")]
    pub term: String,

    #[serde(default)]
    pub days_present: i32,

    #[serde(default)]
    pub days_absent: i32,

    #[serde(default)]
    pub days_late: i32,

    #[serde(default)]
    pub teacher_remarks: String,

    pub class_rank: Option<i32>,
    pub qa1_rank: Option<i32>,
    pub qa2_rank: Option<i32>,
    pub total_students: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCardResponse {
    pub report_card_id: Uuid,
    pub student_id: Uuid,
    pub term: String,
    pub days_present: i32,
    pub days_absent: i32,
    pub days_late: i32,
    pub teacher_remarks: String,
    pub class_rank: i32,
    pub qa1_rank: i32,
    pub qa2_rank: i32,
    pub total_students: i32,
    pub overall_average: Option<f64>,
    pub overall_grade: Option<String>,
}

impl From<report_card::Model> for ReportCardResponse {
    fn from(model: report_card::Model) -> Self {
        Self {
            report_card_id: model.report_card_id,
            student_id: model.student_id,
            term: model.term,
            days_present: model.days_present,
            days_absent: model.days_absent,
            days_late: model.days_late,
            teacher_remarks: model.teacher_remarks,
            class_rank: model.class_rank,
            qa1_rank: model.qa1_rank,
            qa2_rank: model.qa2_rank,
            total_students: model.total_students,
            overall_average: model.overall_average,
            overall_grade: model.overall_grade,
        }
    }
}
