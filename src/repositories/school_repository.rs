use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::school;
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

pub struct SchoolRepository;

impl SchoolRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        address: Option<String>,
        admin_email: Option<String>,
        admin_password: Option<String>,
        admin_name: Option<String>,
    ) -> Result<school::Model, ServiceError> {
        let db = self.get_connection();

        let existing = school::Entity::find()
            .filter(school::Column::Email.eq(email.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "School with this email already exists".to_string(),
            ));
        }

        if let Some(ref admin_email) = admin_email {
            let existing_admin = school::Entity::find()
                .filter(school::Column::AdminEmail.eq(admin_email.as_str()))
                .one(db)
                .await?;
            if existing_admin.is_some() {
                return Err(ServiceError::Conflict("Admin email already in use".to_string()));
            }
        }

        let admin_password_hash = match admin_password {
            Some(password) => Some(bcrypt::hash(&password, bcrypt::DEFAULT_COST)?),
            None => None,
        };

        let now = Utc::now().naive_utc();
        let school_model = school::ActiveModel {
            school_id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            admin_email: Set(admin_email),
            admin_password: Set(admin_password_hash),
            admin_name: Set(admin_name),
            phone: Set(phone),
            address: Set(address),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = school_model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_all(&self) -> Result<Vec<school::Model>, ServiceError> {
        let db = self.get_connection();
        let schools = school::Entity::find()
            .order_by_desc(school::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(schools)
    }

    pub async fn find_by_id(&self, school_id: Uuid) -> Result<school::Model, ServiceError> {
        let db = self.get_connection();
        school::Entity::find()
            .filter(school::Column::SchoolId.eq(school_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("School not found".to_string()))
    }

    pub async fn find_active_by_admin_email(
        &self,
        admin_email: &str,
    ) -> Result<Option<school::Model>, ServiceError> {
        let db = self.get_connection();
        let school = school::Entity::find()
            .filter(school::Column::AdminEmail.eq(admin_email))
            .filter(school::Column::IsActive.eq(true))
            .one(db)
            .await?;
        Ok(school)
    }

    pub async fn update(
        &self,
        school_id: Uuid,
        updates: SchoolUpdate,
    ) -> Result<school::Model, ServiceError> {
        let school = self.find_by_id(school_id).await?;
        let db = self.get_connection();

        let mut active_model: school::ActiveModel = school.into();

        if let Some(name) = updates.name {
            active_model.name = Set(name);
        }
        if let Some(email) = updates.email {
            active_model.email = Set(email);
        }
        if let Some(phone) = updates.phone {
            active_model.phone = Set(Some(phone));
        }
        if let Some(address) = updates.address {
            active_model.address = Set(Some(address));
        }
        if let Some(admin_name) = updates.admin_name {
            active_model.admin_name = Set(Some(admin_name));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn update_admin_password(
        &self,
        school_id: Uuid,
        password_hash: String,
    ) -> Result<school::Model, ServiceError> {
        let school = self.find_by_id(school_id).await?;
        let db = self.get_connection();

        let mut active_model: school::ActiveModel = school.into();
        active_model.admin_password = Set(Some(password_hash));
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// Soft delete: the school and its data stay in place, logins stop.
    pub async fn deactivate(&self, school_id: Uuid) -> Result<school::Model, ServiceError> {
        self.set_active(school_id, false).await
    }

    pub async fn restore(&self, school_id: Uuid) -> Result<school::Model, ServiceError> {
        self.set_active(school_id, true).await
    }

    async fn set_active(
        &self,
        school_id: Uuid,
        is_active: bool,
    ) -> Result<school::Model, ServiceError> {
        let school = self.find_by_id(school_id).await?;
        let db = self.get_connection();

        let mut active_model: school::ActiveModel = school.into();
        active_model.is_active = Set(is_active);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// Hard delete; the database cascades to classes, students, subjects,
    /// assessments, report cards, grade configs and teachers.
    pub async fn delete_permanently(&self, school_id: Uuid) -> Result<(), ServiceError> {
        let school = self.find_by_id(school_id).await?;
        let db = self.get_connection();

        let active_model: school::ActiveModel = school.into();
        active_model.delete(db).await?;
        Ok(())
    }
}

pub struct SchoolUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub admin_name: Option<String>,
}
