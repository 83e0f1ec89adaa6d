use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::entities::{class, student, teacher};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

/// First contiguous digit run in a class name ("Grade 8A" -> "8").
pub fn first_digit_run(name: &str) -> Option<String> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}

/// Class codes look like `GRAD8-2024-2025-TE-X7KQ`: a name fragment, the
/// academic year, the first two letters of the term and a random suffix to
/// keep the code unique across tenants.
pub fn generate_class_code(name: &str, academic_year: &str, term: &str) -> String {
    let name_code: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(4)
        .collect();

    let class_number = first_digit_run(name).unwrap_or_else(|| "00".to_string());

    let term_code: String = term.chars().take(2).collect::<String>().to_uppercase();

    const SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    let random_suffix: String = (0..4)
        .map(|_| SUFFIX_CHARS[rng.random_range(0..SUFFIX_CHARS.len())] as char)
        .collect();

    format!(
        "{}{}-{}-{}-{}",
        name_code,
        class_number,
        academic_year.replace('/', "-"),
        term_code,
        random_suffix
    )
}

pub struct ClassRepository;

impl ClassRepository {
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
        academic_year: String,
        term: String,
    ) -> Result<class::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = class::Entity::find()
            .filter(class::Column::Name.eq(name.as_str()))
            .filter(class::Column::AcademicYear.eq(academic_year.as_str()))
            .filter(class::Column::Term.eq(term.as_str()));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(class::Column::SchoolId.eq(school_id));
        }

        if query.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Class \"{}\" already exists for {} {}",
                name, academic_year, term
            )));
        }

        let class_code = generate_class_code(&name, &academic_year, &term);

        let class_model = class::ActiveModel {
            class_id: Set(Uuid::new_v4()),
            name: Set(name),
            academic_year: Set(academic_year),
            term: Set(term),
            class_code: Set(class_code),
            class_teacher_id: Set(None),
            school_id: Set(ctx.school_id),
            created_at: Set(Utc::now().naive_utc()),
        };

        let result = class_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_by_id(
        &self,
        class_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<class::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = class::Entity::find().filter(class::Column::ClassId.eq(class_id));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(class::Column::SchoolId.eq(school_id));
        }

        query
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Class {} not found", class_id)))
    }

    /// Classes with their rosters and class teachers, newest first.
    pub async fn find_all_with_details(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<(class::Model, Vec<student::Model>, Option<teacher::Model>)>, ServiceError>
    {
        let db = self.get_connection();

        let mut query = class::Entity::find().order_by_desc(class::Column::CreatedAt);
        if let Some(school_id) = ctx.school_id {
            query = query.filter(class::Column::SchoolId.eq(school_id));
        }

        let classes = query.all(db).await?;

        let mut details = Vec::with_capacity(classes.len());
        for class_entity in classes {
            let students = student::Entity::find()
                .filter(student::Column::ClassId.eq(class_entity.class_id))
                .order_by_asc(student::Column::ExamNumber)
                .all(db)
                .await?;

            let class_teacher = match class_entity.class_teacher_id {
                Some(teacher_id) => {
                    teacher::Entity::find()
                        .filter(teacher::Column::TeacherId.eq(teacher_id))
                        .one(db)
                        .await?
                }
                None => None,
            };

            details.push((class_entity, students, class_teacher));
        }

        Ok(details)
    }

    pub async fn roster(
        &self,
        class_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<(class::Model, Vec<student::Model>), ServiceError> {
        let db = self.get_connection();
        let class_entity = self.find_by_id(class_id, ctx).await?;

        let students = student::Entity::find()
            .filter(student::Column::ClassId.eq(class_entity.class_id))
            .order_by_asc(student::Column::ExamNumber)
            .all(db)
            .await?;

        Ok((class_entity, students))
    }

    pub async fn delete(&self, class_id: Uuid, ctx: &RequestContext) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let class_entity = self.find_by_id(class_id, ctx).await?;

        let students = student::Entity::find()
            .filter(student::Column::ClassId.eq(class_entity.class_id))
            .all(db)
            .await?;

        if !students.is_empty() {
            return Err(ServiceError::Conflict(
                "Cannot delete class with students. Delete students first.".to_string(),
            ));
        }

        let active_model: class::ActiveModel = class_entity.into();
        active_model.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("Grade 8A"), Some("8".to_string()));
        assert_eq!(first_digit_run("Form 12B"), Some("12".to_string()));
        assert_eq!(first_digit_run("Reception"), None);
    }

    #[test]
    fn test_generate_class_code_shape() {
        let code = generate_class_code("Grade 8A", "2024/2025", "Term 1");
        assert!(code.starts_with("GRAD8-2024-2025-TE-"), "got {}", code);
        assert_eq!(code.len(), "GRAD8-2024-2025-TE-".len() + 4);
    }

    #[test]
    fn test_generate_class_code_without_digits() {
        let code = generate_class_code("Reception", "2024/2025", "Term 2");
        assert!(code.starts_with("RECE00-2024-2025-TE-"), "got {}", code);
    }
}
