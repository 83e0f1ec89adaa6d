use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::entities::{class, student, subject, teacher, teacher_class_subject};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct TeacherRepository;

impl TeacherRepository {
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
        school_id: Uuid,
        name: String,
        email: String,
        password: String,
    ) -> Result<teacher::Model, ServiceError> {
        let db = self.get_connection();

        let existing = teacher::Entity::find()
            .filter(teacher::Column::Email.eq(email.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "A teacher with this email already exists".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
        let now = Utc::now().naive_utc();

        let teacher_model = teacher::ActiveModel {
            teacher_id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password: Set(password_hash),
            school_id: Set(school_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = teacher_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_by_school(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<teacher::Model>, ServiceError> {
        let db = self.get_connection();
        let teachers = teacher::Entity::find()
            .filter(teacher::Column::SchoolId.eq(school_id))
            .order_by_desc(teacher::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(teachers)
    }

    pub async fn find_by_id(&self, teacher_id: Uuid) -> Result<Option<teacher::Model>, ServiceError> {
        let db = self.get_connection();
        let teacher_entity = teacher::Entity::find()
            .filter(teacher::Column::TeacherId.eq(teacher_id))
            .one(db)
            .await?;
        Ok(teacher_entity)
    }

    pub async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<teacher::Model>, ServiceError> {
        let db = self.get_connection();
        let teacher_entity = teacher::Entity::find()
            .filter(teacher::Column::Email.eq(email))
            .filter(teacher::Column::IsActive.eq(true))
            .one(db)
            .await?;
        Ok(teacher_entity)
    }

    pub async fn update_password(
        &self,
        teacher_id: Uuid,
        password_hash: String,
    ) -> Result<teacher::Model, ServiceError> {
        let teacher_entity = self
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Teacher not found".to_string()))?;
        let db = self.get_connection();

        let mut active_model: teacher::ActiveModel = teacher_entity.into();
        active_model.password = Set(password_hash);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn delete(
        &self,
        teacher_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();

        let result = teacher::Entity::delete_many()
            .filter(teacher::Column::TeacherId.eq(teacher_id))
            .filter(teacher::Column::SchoolId.eq(school_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Teacher not found".to_string()));
        }
        Ok(())
    }

    pub async fn assign_class_subject(
        &self,
        teacher_id: Uuid,
        class_id: Uuid,
        subject_id: Uuid,
    ) -> Result<teacher_class_subject::Model, ServiceError> {
        let db = self.get_connection();

        let existing = teacher_class_subject::Entity::find()
            .filter(teacher_class_subject::Column::TeacherId.eq(teacher_id))
            .filter(teacher_class_subject::Column::ClassId.eq(class_id))
            .filter(teacher_class_subject::Column::SubjectId.eq(subject_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Teacher is already assigned to this class and subject".to_string(),
            ));
        }

        if self.find_by_id(teacher_id).await?.is_none() {
            return Err(ServiceError::NotFound("Teacher not found".to_string()));
        }

        let class_exists = class::Entity::find()
            .filter(class::Column::ClassId.eq(class_id))
            .one(db)
            .await?;
        if class_exists.is_none() {
            return Err(ServiceError::NotFound("Class not found".to_string()));
        }

        let subject_exists = subject::Entity::find()
            .filter(subject::Column::SubjectId.eq(subject_id))
            .one(db)
            .await?;
        if subject_exists.is_none() {
            return Err(ServiceError::NotFound("Subject not found".to_string()));
        }

        let assignment_model = teacher_class_subject::ActiveModel {
            assignment_id: Set(Uuid::new_v4()),
            teacher_id: Set(teacher_id),
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            created_at: Set(Utc::now().naive_utc()),
        };

        let result = assignment_model.insert(db).await?;
        Ok(result)
    }

    pub async fn remove_assignment(
        &self,
        teacher_id: Uuid,
        class_id: Uuid,
        subject_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();

        let result = teacher_class_subject::Entity::delete_many()
            .filter(teacher_class_subject::Column::TeacherId.eq(teacher_id))
            .filter(teacher_class_subject::Column::ClassId.eq(class_id))
            .filter(teacher_class_subject::Column::SubjectId.eq(subject_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Assignment not found".to_string()));
        }
        Ok(())
    }

    pub async fn assignments(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<teacher_class_subject::Model>, ServiceError> {
        let db = self.get_connection();
        let assignments = teacher_class_subject::Entity::find()
            .filter(teacher_class_subject::Column::TeacherId.eq(teacher_id))
            .all(db)
            .await?;
        Ok(assignments)
    }

    /// Distinct classes across a teacher's assignments.
    pub async fn classes(&self, teacher_id: Uuid) -> Result<Vec<class::Model>, ServiceError> {
        let db = self.get_connection();

        let assignments = teacher_class_subject::Entity::find()
            .filter(teacher_class_subject::Column::TeacherId.eq(teacher_id))
            .find_also_related(class::Entity)
            .all(db)
            .await?;

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut classes = Vec::new();
        for (_, class_entity) in assignments {
            if let Some(class_entity) = class_entity {
                if seen.insert(class_entity.class_id) {
                    classes.push(class_entity);
                }
            }
        }
        Ok(classes)
    }

    /// Distinct subjects across a teacher's assignments.
    pub async fn subjects(&self, teacher_id: Uuid) -> Result<Vec<subject::Model>, ServiceError> {
        let db = self.get_connection();

        let assignments = teacher_class_subject::Entity::find()
            .filter(teacher_class_subject::Column::TeacherId.eq(teacher_id))
            .find_also_related(subject::Entity)
            .all(db)
            .await?;

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut subjects = Vec::new();
        for (_, subject_entity) in assignments {
            if let Some(subject_entity) = subject_entity {
                if seen.insert(subject_entity.subject_id) {
                    subjects.push(subject_entity);
                }
            }
        }
        Ok(subjects)
    }

    /// Students across every class the teacher is assigned to.
    pub async fn students(&self, teacher_id: Uuid) -> Result<Vec<student::Model>, ServiceError> {
        let db = self.get_connection();

        let assignments = self.assignments(teacher_id).await?;
        let class_ids: Vec<Uuid> = assignments.iter().map(|a| a.class_id).collect();

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let students = student::Entity::find()
            .filter(student::Column::ClassId.is_in(class_ids))
            .order_by_asc(student::Column::ExamNumber)
            .all(db)
            .await?;
        Ok(students)
    }

    pub async fn assign_class_teacher(
        &self,
        teacher_id: Uuid,
        class_id: Uuid,
    ) -> Result<(teacher::Model, class::Model), ServiceError> {
        let db = self.get_connection();

        let teacher_entity = self
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Teacher not found".to_string()))?;

        let class_entity = class::Entity::find()
            .filter(class::Column::ClassId.eq(class_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Class not found".to_string()))?;

        if class_entity.class_teacher_id == Some(teacher_id) {
            return Err(ServiceError::Conflict(
                "This teacher is already class teacher for this class".to_string(),
            ));
        }

        let mut active_model: class::ActiveModel = class_entity.into();
        active_model.class_teacher_id = Set(Some(teacher_id));
        let updated = active_model.update(db).await?;

        Ok((teacher_entity, updated))
    }

    pub async fn remove_class_teacher(&self, class_id: Uuid) -> Result<class::Model, ServiceError> {
        let db = self.get_connection();

        let class_entity = class::Entity::find()
            .filter(class::Column::ClassId.eq(class_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Class not found".to_string()))?;

        if class_entity.class_teacher_id.is_none() {
            return Err(ServiceError::NotFound(
                "No class teacher assigned to this class".to_string(),
            ));
        }

        let mut active_model: class::ActiveModel = class_entity.into();
        active_model.class_teacher_id = Set(None);
        let updated = active_model.update(db).await?;
        Ok(updated)
    }

    pub async fn class_teacher(
        &self,
        class_id: Uuid,
    ) -> Result<Option<teacher::Model>, ServiceError> {
        let db = self.get_connection();

        let class_entity = class::Entity::find()
            .filter(class::Column::ClassId.eq(class_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Class not found".to_string()))?;

        match class_entity.class_teacher_id {
            Some(teacher_id) => self.find_by_id(teacher_id).await,
            None => Ok(None),
        }
    }

    /// Subject ids the teacher is assigned to teach in one class. Used to
    /// narrow the class-results view for teacher-scoped calls.
    pub async fn subject_ids_for_class(
        &self,
        teacher_id: Uuid,
        class_id: Uuid,
    ) -> Result<Vec<Uuid>, ServiceError> {
        let assignments = self.assignments(teacher_id).await?;
        Ok(assignments
            .into_iter()
            .filter(|a| a.class_id == class_id)
            .map(|a| a.subject_id)
            .collect())
    }
}
