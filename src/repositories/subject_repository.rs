use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::entities::subject;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct SubjectRepository;

impl SubjectRepository {
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
        description: Option<String>,
    ) -> Result<subject::Model, ServiceError> {
        let db = self.get_connection();

        let mut query = subject::Entity::find().filter(subject::Column::Name.eq(name.as_str()));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(subject::Column::SchoolId.eq(school_id));
        }
        if query.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Subject \"{}\" already exists",
                name
            )));
        }

        let subject_model = subject::ActiveModel {
            subject_id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            school_id: Set(ctx.school_id),
        };

        let result = subject_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_all(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<subject::Model>, ServiceError> {
        let db = self.get_connection();

        let mut query = subject::Entity::find().order_by_asc(subject::Column::Name);
        if let Some(school_id) = ctx.school_id {
            query = query.filter(subject::Column::SchoolId.eq(school_id));
        }

        let subjects = query.all(db).await?;
        Ok(subjects)
    }

    pub async fn delete(
        &self,
        subject_id: Uuid,
        ctx: &RequestContext,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();

        let mut query = subject::Entity::find().filter(subject::Column::SubjectId.eq(subject_id));
        if let Some(school_id) = ctx.school_id {
            query = query.filter(subject::Column::SchoolId.eq(school_id));
        }

        let subject = query
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Subject {} not found", subject_id)))?;

        let active_model: subject::ActiveModel = subject.into();
        active_model.delete(db).await?;
        Ok(())
    }
}
