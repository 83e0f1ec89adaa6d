use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::config::DEFAULT_EXAM_PREFIX;
use crate::context::RequestContext;
use crate::entities::{class, report_card, student};
use crate::error::ServiceError;
use crate::repositories::class_repository::first_digit_run;
use crate::static_service::DATABASE_CONNECTION;

/// Exam numbers look like `a3f-25-8012`: school fragment, two-digit year,
/// class number, then a three-digit per-prefix sequence.
pub fn exam_number_prefix(school_id: Option<Uuid>, year_suffix: &str, class_name: &str) -> String {
    let school_fragment = match school_id {
        Some(id) => id.to_string().chars().take(3).collect(),
        None => DEFAULT_EXAM_PREFIX.to_string(),
    };
    let class_number = first_digit_run(class_name).unwrap_or_else(|| "0".to_string());
    format!("{}-{}-{}", school_fragment, year_suffix, class_number)
}

/// Next sequence number after the highest existing exam number under the
/// prefix. An unparsable tail restarts the sequence at 1.
pub fn next_exam_sequence(prefix: &str, last_exam_number: Option<&str>) -> u32 {
    match last_exam_number {
        Some(last) => {
            last.get(prefix.len()..)
                .and_then(|tail| tail.parse::<u32>().ok())
                .unwrap_or(0)
                + 1
        }
        None => 1,
    }
}

pub fn compose_exam_number(prefix: &str, sequence: u32) -> String {
    format!("{}{:03}", prefix, sequence)
}

pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: String,
        class_id: Uuid,
        photo_url: Option<String>,
    ) -> Result<student::Model, ServiceError> {
        let db = self.get_connection();

        let mut class_query = class::Entity::find().filter(class::Column::ClassId.eq(class_id));
        if let Some(school_id) = ctx.school_id {
            class_query = class_query.filter(class::Column::SchoolId.eq(school_id));
        }
        let class_entity = class_query.one(db).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Class {} not found in your school", class_id))
        })?;

        let year_suffix = format!("{:02}", Utc::now().year() % 100);
        let prefix = exam_number_prefix(ctx.school_id, &year_suffix, &class_entity.name);

        let mut last_query = student::Entity::find()
            .filter(student::Column::ExamNumber.like(format!("{}%", prefix)))
            .order_by_desc(student::Column::ExamNumber);
        if let Some(school_id) = ctx.school_id {
            last_query = last_query.filter(student::Column::SchoolId.eq(school_id));
        }
        let last_student = last_query.one(db).await?;

        let sequence = next_exam_sequence(&prefix, last_student.map(|s| s.exam_number).as_deref());
        let exam_number = compose_exam_number(&prefix, sequence);

        let now = Utc::now().naive_utc();
        let student_model = student::ActiveModel {
            student_id: Set(Uuid::new_v4()),
            exam_number: Set(exam_number),
            name: Set(name),
            class_id: Set(Some(class_entity.class_id)),
            photo_url: Set(photo_url),
            school_id: Set(ctx.school_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = student_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_all(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<student::Model>, ServiceError> {
        let db = self.get_connection();

        let mut query = student::Entity::find().order_by_asc(student::Column::ExamNumber);
        if let Some(school_id) = ctx.school_id {
            query = query.filter(student::Column::SchoolId.eq(school_id));
        }

        let students = query.all(db).await?;
        Ok(students)
    }

    pub async fn find_by_id(
        &self,
        student_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<student::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = student::Entity::find().filter(student::Column::StudentId.eq(student_id));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(student::Column::SchoolId.eq(school_id));
        }

        query
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Student {} not found", student_id)))
    }

    /// Exam-number lookup is deliberately global: report cards are pulled
    /// up by exam number without a tenant credential, and the grading
    /// policy is resolved from the student's own school afterwards.
    pub async fn find_by_exam_number(
        &self,
        exam_number: &str,
    ) -> Result<student::Model, ServiceError> {
        let db = self.get_connection();

        student::Entity::find()
            .filter(student::Column::ExamNumber.eq(exam_number))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Student {} not found", exam_number)))
    }

    pub async fn update(
        &self,
        student_id: Uuid,
        ctx: &RequestContext,
        updates: StudentUpdate,
    ) -> Result<student::Model, ServiceError> {
        let db = self.get_connection();
        let student_entity = self.find_by_id(student_id, ctx).await?;

        let mut active_model: student::ActiveModel = student_entity.into();

        if let Some(class_id) = updates.class_id {
            let mut class_query = class::Entity::find().filter(class::Column::ClassId.eq(class_id));
            if let Some(school_id) = ctx.school_id {
                class_query = class_query.filter(class::Column::SchoolId.eq(school_id));
            }
            let class_entity = class_query.one(db).await?.ok_or_else(|| {
                ServiceError::NotFound(format!("Class {} not found in your school", class_id))
            })?;
            active_model.class_id = Set(Some(class_entity.class_id));
        }

        if let Some(name) = updates.name {
            active_model.name = Set(name);
        }
        if let Some(photo_url) = updates.photo_url {
            active_model.photo_url = Set(Some(photo_url));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn remove(
        &self,
        student_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let student_entity = self.find_by_id(student_id, ctx).await?;

        let active_model: student::ActiveModel = student_entity.into();
        active_model.delete(db).await?;
        Ok(())
    }

    /// Report cards newest first; the head is "the most recent" one shown
    /// on the student payload.
    pub async fn report_cards(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<report_card::Model>, ServiceError> {
        let db = self.get_connection();

        let report_cards = report_card::Entity::find()
            .filter(report_card::Column::StudentId.eq(student_id))
            .order_by_desc(report_card::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(report_cards)
    }
}

pub struct StudentUpdate {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub class_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_number_prefix_with_school() {
        let school_id = Uuid::parse_str("a3f17c2e-0000-0000-0000-000000000000").unwrap();
        assert_eq!(
            exam_number_prefix(Some(school_id), "25", "Grade 8A"),
            "a3f-25-8"
        );
    }

    #[test]
    fn test_exam_number_prefix_without_school() {
        assert_eq!(exam_number_prefix(None, "25", "Reception"), "SCH-25-0");
    }

    #[test]
    fn test_next_exam_sequence() {
        assert_eq!(next_exam_sequence("a3f-25-8", None), 1);
        assert_eq!(next_exam_sequence("a3f-25-8", Some("a3f-25-8007")), 8);
        assert_eq!(next_exam_sequence("a3f-25-8", Some("a3f-25-8xyz")), 1);
    }

    #[test]
    fn test_compose_exam_number_zero_pads() {
        assert_eq!(compose_exam_number("a3f-25-8", 7), "a3f-25-8007");
        assert_eq!(compose_exam_number("a3f-25-8", 123), "a3f-25-8123");
    }
}
