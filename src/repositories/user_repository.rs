use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        let db = self.get_connection();
        let user = user::Entity::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        let db = self.get_connection();
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(user)
    }

    pub async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        role: RoleEnum,
    ) -> Result<user::Model, ServiceError> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();

        let user_model = user::ActiveModel {
            user_id: Set(Uuid::new_v4()),
            full_name: Set(full_name),
            email: Set(email),
            password: Set(password_hash),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = user_model.insert(db).await?;
        Ok(result)
    }

    pub async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: String,
    ) -> Result<user::Model, ServiceError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        let db = self.get_connection();

        let mut active_user: user::ActiveModel = user.into();
        active_user.password = Set(password_hash);
        active_user.updated_at = Set(Utc::now().naive_utc());

        let result = active_user.update(db).await?;
        Ok(result)
    }
}
