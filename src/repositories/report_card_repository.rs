use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::entities::{class, report_card, student};
use crate::error::ServiceError;
use crate::grading::{self, StudentKindAverages};
use crate::repositories::assessment_repository::{self, AssessmentRepository};
use crate::repositories::grade_config_repository::GradeConfigRepository;
use crate::static_service::DATABASE_CONNECTION;

/// Permission gate for attendance/remarks writes. A write carrying a
/// requesting-teacher identity must come from the class's designated class
/// teacher; admin-originated writes carry no teacher identity and skip the
/// check entirely.
pub fn ensure_class_teacher(
    requesting_teacher_id: Option<Uuid>,
    class_teacher_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    match requesting_teacher_id {
        None => Ok(()),
        Some(requester) if class_teacher_id == Some(requester) => Ok(()),
        Some(_) => Err(ServiceError::Forbidden(
            "Only class teacher can update attendance and remarks".to_string(),
        )),
    }
}

pub struct ReportCardUpsert {
    pub student_id: Uuid,
    pub term: String,
    pub days_present: i32,
    pub days_absent: i32,
    pub days_late: i32,
    pub teacher_remarks: String,
    pub class_rank: Option<i32>,
    pub qa1_rank: Option<i32>,
    pub qa2_rank: Option<i32>,
    pub total_students: Option<i32>,
}

pub struct ReportCardRepository;

impl ReportCardRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_student_and_term(
        &self,
        student_id: Uuid,
        term: &str,
        ctx: &RequestContext,
    ) -> Result<Option<report_card::Model>, ServiceError> {
        let db = self.get_connection();

        if ctx.school_id.is_some() {
            // Tenant check happens on the student row
            let mut query = student::Entity::find().filter(student::Column::StudentId.eq(student_id));
            if let Some(school_id) = ctx.school_id {
                query = query.filter(student::Column::SchoolId.eq(school_id));
            }
            if query.one(db).await?.is_none() {
                return Ok(None);
            }
        }

        let report = report_card::Entity::find()
            .filter(report_card::Column::StudentId.eq(student_id))
            .filter(report_card::Column::Term.eq(term))
            .one(db)
            .await?;
        Ok(report)
    }

    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        data: ReportCardUpsert,
    ) -> Result<report_card::Model, ServiceError> {
        let db = self.get_connection();

        let mut student_query =
            student::Entity::find().filter(student::Column::StudentId.eq(data.student_id));
        if let Some(school_id) = ctx.school_id {
            student_query = student_query.filter(student::Column::SchoolId.eq(school_id));
        }
        let student_entity = student_query.one(db).await?.ok_or_else(|| {
            ServiceError::NotFound("Student not found in your school".to_string())
        })?;

        if ctx.teacher_id.is_some() {
            let class_teacher_id = match student_entity.class_id {
                Some(class_id) => class::Entity::find()
                    .filter(class::Column::ClassId.eq(class_id))
                    .one(db)
                    .await?
                    .and_then(|c| c.class_teacher_id),
                None => None,
            };
            ensure_class_teacher(ctx.teacher_id, class_teacher_id)?;
        }

        let existing = report_card::Entity::find()
            .filter(report_card::Column::StudentId.eq(data.student_id))
            .filter(report_card::Column::Term.eq(data.term.as_str()))
            .one(db)
            .await?;

        let now = Utc::now().naive_utc();

        let saved = match existing {
            Some(existing) => {
                let mut active_model: report_card::ActiveModel = existing.into();
                active_model.days_present = Set(data.days_present);
                active_model.days_absent = Set(data.days_absent);
                active_model.days_late = Set(data.days_late);
                active_model.teacher_remarks = Set(data.teacher_remarks);
                if let Some(class_rank) = data.class_rank {
                    active_model.class_rank = Set(class_rank);
                }
                if let Some(qa1_rank) = data.qa1_rank {
                    active_model.qa1_rank = Set(qa1_rank);
                }
                if let Some(qa2_rank) = data.qa2_rank {
                    active_model.qa2_rank = Set(qa2_rank);
                }
                if let Some(total_students) = data.total_students {
                    active_model.total_students = Set(total_students);
                }
                active_model.updated_at = Set(now);
                active_model.update(db).await?
            }
            None => {
                let report_model = report_card::ActiveModel {
                    report_card_id: Set(Uuid::new_v4()),
                    student_id: Set(data.student_id),
                    term: Set(data.term),
                    days_present: Set(data.days_present),
                    days_absent: Set(data.days_absent),
                    days_late: Set(data.days_late),
                    teacher_remarks: Set(data.teacher_remarks),
                    class_rank: Set(data.class_rank.unwrap_or(0)),
                    qa1_rank: Set(data.qa1_rank.unwrap_or(0)),
                    qa2_rank: Set(data.qa2_rank.unwrap_or(0)),
                    total_students: Set(data.total_students.unwrap_or(0)),
                    overall_average: Set(None),
                    overall_grade: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                report_model.insert(db).await?
            }
        };

        Ok(saved)
    }

    /// Ranking batch for one class and term: three independent rankings
    /// (QA1, QA2, end-of-term) over per-kind averages, written onto one
    /// report card per student. The writes run inside one transaction so a
    /// failing write cannot leave half the class re-ranked.
    pub async fn calculate_and_update_ranks(
        &self,
        class_id: Uuid,
        term: &str,
        ctx: &RequestContext,
    ) -> Result<usize, ServiceError> {
        let db = self.get_connection();

        let mut class_query = class::Entity::find().filter(class::Column::ClassId.eq(class_id));
        if let Some(school_id) = ctx.school_id {
            class_query = class_query.filter(class::Column::SchoolId.eq(school_id));
        }
        if class_query.one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Class {} not found",
                class_id
            )));
        }

        let roster = student::Entity::find()
            .filter(student::Column::ClassId.eq(class_id))
            .all(db)
            .await?;
        let total_students = roster.len() as i32;

        let assessment_repo = AssessmentRepository::new();
        let mut results: Vec<StudentKindAverages> = Vec::with_capacity(roster.len());
        for student_entity in &roster {
            let kind_scores = assessment_repo
                .kind_scores_for_student(student_entity.student_id)
                .await?;
            results.push(StudentKindAverages {
                student_id: student_entity.student_id,
                averages: grading::ranking_averages(&kind_scores),
            });
        }

        let qa1_order = grading::ranking_order(&results, |avg| avg.qa1);
        let qa2_order = grading::ranking_order(&results, |avg| avg.qa2);
        let end_of_term_order = grading::ranking_order(&results, |avg| avg.end_of_term);

        let txn = db.begin().await?;
        let now = Utc::now().naive_utc();

        for student_entity in &roster {
            let student_id = student_entity.student_id;

            let existing = report_card::Entity::find()
                .filter(report_card::Column::StudentId.eq(student_id))
                .filter(report_card::Column::Term.eq(term))
                .one(&txn)
                .await?;

            let qa1_rank = grading::rank_of(&qa1_order, student_id);
            let qa2_rank = grading::rank_of(&qa2_order, student_id);
            let class_rank = grading::rank_of(&end_of_term_order, student_id);

            match existing {
                Some(existing) => {
                    let mut active_model: report_card::ActiveModel = existing.into();
                    active_model.qa1_rank = Set(qa1_rank);
                    active_model.qa2_rank = Set(qa2_rank);
                    active_model.class_rank = Set(class_rank);
                    active_model.total_students = Set(total_students);
                    active_model.updated_at = Set(now);
                    active_model.update(&txn).await?;
                }
                None => {
                    let report_model = report_card::ActiveModel {
                        report_card_id: Set(Uuid::new_v4()),
                        student_id: Set(student_id),
                        term: Set(term.to_string()),
                        days_present: Set(0),
                        days_absent: Set(0),
                        days_late: Set(0),
                        teacher_remarks: Set(String::new()),
                        class_rank: Set(class_rank),
                        qa1_rank: Set(qa1_rank),
                        qa2_rank: Set(qa2_rank),
                        total_students: Set(total_students),
                        overall_average: Set(None),
                        overall_grade: Set(None),
                        created_at: Set(now),
                        updated_at: Set(now),
                    };
                    report_model.insert(&txn).await?;
                }
            }
        }

        txn.commit().await?;

        Ok(roster.len())
    }

    /// Recomputes the cached overall average/grade on every report card in
    /// the tenant under the currently active policy. Runs after a grade
    /// configuration is activated.
    pub async fn refresh_overall_grades(
        &self,
        ctx: &RequestContext,
    ) -> Result<usize, ServiceError> {
        let db = self.get_connection();

        let mut query = report_card::Entity::find()
            .find_also_related(student::Entity)
            .order_by_asc(report_card::Column::CreatedAt);
        if let Some(school_id) = ctx.school_id {
            query = query.filter(student::Column::SchoolId.eq(school_id));
        }
        let report_cards = query.all(db).await?;

        let config = GradeConfigRepository::new()
            .active_or_default(ctx.school_id)
            .await?;
        let policy = config.policy();

        let assessment_repo = AssessmentRepository::new();
        let mut updated = 0usize;

        for (report, student_entity) in report_cards {
            let Some(student_entity) = student_entity else {
                continue;
            };

            let pairs = assessment_repo
                .find_by_student(student_entity.student_id)
                .await?;
            let rows = assessment_repository::assessment_rows(&pairs);
            let triples = grading::subject_triples(&rows);

            let overall_average = grading::overall_average(&triples, &policy);
            let overall_grade = grading::letter_grade(overall_average, &policy).to_string();

            let mut active_model: report_card::ActiveModel = report.into();
            active_model.overall_average = Set(Some(overall_average));
            active_model.overall_grade = Set(Some(overall_grade));
            active_model.updated_at = Set(Utc::now().naive_utc());
            active_model.update(db).await?;

            updated += 1;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_skipped_without_teacher_identity() {
        assert!(ensure_class_teacher(None, Some(Uuid::new_v4())).is_ok());
        assert!(ensure_class_teacher(None, None).is_ok());
    }

    #[test]
    fn test_gate_allows_class_teacher() {
        let teacher_id = Uuid::new_v4();
        assert!(ensure_class_teacher(Some(teacher_id), Some(teacher_id)).is_ok());
    }

    #[test]
    fn test_gate_rejects_other_teacher() {
        let result = ensure_class_teacher(Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn test_gate_rejects_teacher_when_class_has_no_class_teacher() {
        let result = ensure_class_teacher(Some(Uuid::new_v4()), None);
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }
}
