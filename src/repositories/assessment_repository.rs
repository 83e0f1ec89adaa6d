use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::entities::sea_orm_active_enums::AssessmentKind;
use crate::entities::{assessment, student, subject};
use crate::error::ServiceError;
use crate::grading::{self, AssessmentRow};
use crate::repositories::grade_config_repository::GradeConfigRepository;
use crate::static_service::DATABASE_CONNECTION;

/// Score writes arrive as one numeric field; a raw 0 means "remove the
/// row", never "store a zero". The branch is named here so the rule is
/// explicit at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreWrite {
    Upsert(i32),
    Delete,
}

impl ScoreWrite {
    pub fn from_raw(score: i32) -> Self {
        if score == 0 {
            ScoreWrite::Delete
        } else {
            ScoreWrite::Upsert(score)
        }
    }
}

#[derive(Debug)]
pub enum UpsertOutcome {
    Deleted,
    Saved(assessment::Model),
}

pub struct AssessmentRepository;

impl AssessmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        student_id: Uuid,
        subject_id: Uuid,
        kind: AssessmentKind,
        write: ScoreWrite,
    ) -> Result<UpsertOutcome, ServiceError> {
        let db = self.get_connection();

        if let Some(school_id) = ctx.school_id {
            let in_school = student::Entity::find()
                .filter(student::Column::StudentId.eq(student_id))
                .filter(student::Column::SchoolId.eq(school_id))
                .one(db)
                .await?;
            if in_school.is_none() {
                return Err(ServiceError::NotFound(
                    "Student not found in your school".to_string(),
                ));
            }
        }

        let student_entity = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Student not found".to_string()))?;

        let class_id = student_entity.class_id.ok_or_else(|| {
            ServiceError::NotFound("Student is not assigned to any class".to_string())
        })?;

        let existing = assessment::Entity::find()
            .filter(assessment::Column::StudentId.eq(student_id))
            .filter(assessment::Column::SubjectId.eq(subject_id))
            .filter(assessment::Column::AssessmentType.eq(kind.clone()))
            .filter(assessment::Column::ClassId.eq(class_id))
            .one(db)
            .await?;

        match write {
            ScoreWrite::Delete => {
                if let Some(existing) = existing {
                    let active_model: assessment::ActiveModel = existing.into();
                    active_model.delete(db).await?;
                }
                Ok(UpsertOutcome::Deleted)
            }
            ScoreWrite::Upsert(score) => {
                let config = GradeConfigRepository::new()
                    .active_or_default(ctx.school_id)
                    .await?;
                let grade = grading::letter_grade(score as f64, &config.policy()).to_string();
                let now = Utc::now().naive_utc();

                let saved = match existing {
                    Some(existing) => {
                        let mut active_model: assessment::ActiveModel = existing.into();
                        active_model.score = Set(score);
                        active_model.grade = Set(grade);
                        active_model.updated_at = Set(now);
                        active_model.update(db).await?
                    }
                    None => {
                        let assessment_model = assessment::ActiveModel {
                            assessment_id: Set(Uuid::new_v4()),
                            student_id: Set(student_id),
                            subject_id: Set(subject_id),
                            class_id: Set(class_id),
                            assessment_type: Set(kind),
                            score: Set(score),
                            grade: Set(grade),
                            created_at: Set(now),
                            updated_at: Set(now),
                        };
                        assessment_model.insert(db).await?
                    }
                };

                Ok(UpsertOutcome::Saved(saved))
            }
        }
    }

    /// Every assessment of a student with its subject, ordered by subject
    /// name.
    pub async fn find_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<(assessment::Model, Option<subject::Model>)>, ServiceError> {
        let db = self.get_connection();

        let assessments = assessment::Entity::find()
            .filter(assessment::Column::StudentId.eq(student_id))
            .find_also_related(subject::Entity)
            .order_by_asc(subject::Column::Name)
            .all(db)
            .await?;
        Ok(assessments)
    }

    /// Assessments a student earned inside one specific class (a retake in
    /// a later class does not leak into the old class's results).
    pub async fn find_by_student_and_class(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<Vec<(assessment::Model, Option<subject::Model>)>, ServiceError> {
        let db = self.get_connection();

        let assessments = assessment::Entity::find()
            .filter(assessment::Column::StudentId.eq(student_id))
            .filter(assessment::Column::ClassId.eq(class_id))
            .find_also_related(subject::Entity)
            .all(db)
            .await?;
        Ok(assessments)
    }

    /// Bare (kind, score) pairs for the ranking averages.
    pub async fn kind_scores_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<(AssessmentKind, i32)>, ServiceError> {
        let db = self.get_connection();

        let assessments = assessment::Entity::find()
            .filter(assessment::Column::StudentId.eq(student_id))
            .select_only()
            .columns([
                assessment::Column::AssessmentType,
                assessment::Column::Score,
            ])
            .into_tuple::<(AssessmentKind, i32)>()
            .all(db)
            .await?;
        Ok(assessments)
    }
}

/// Joined rows flattened into the shape the grading module consumes.
pub fn assessment_rows(pairs: &[(assessment::Model, Option<subject::Model>)]) -> Vec<AssessmentRow> {
    pairs
        .iter()
        .map(|(assessment_entity, subject_entity)| AssessmentRow {
            subject: subject_entity
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            kind: assessment_entity.assessment_type.clone(),
            score: assessment_entity.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_write_zero_is_delete() {
        assert_eq!(ScoreWrite::from_raw(0), ScoreWrite::Delete);
        assert_eq!(ScoreWrite::from_raw(1), ScoreWrite::Upsert(1));
        assert_eq!(ScoreWrite::from_raw(100), ScoreWrite::Upsert(100));
    }
}
