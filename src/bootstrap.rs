use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;

/// Creates the super-admin account on first start. Credentials come from
/// the environment; nothing happens if the account already exists.
pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let admin_email: &str = &APP_CONFIG.admin_email;
    let default_password: &str = &APP_CONFIG.admin_password;

    let existing_admin = user::Entity::find()
        .filter(user::Column::Email.eq(admin_email))
        .one(db)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(default_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    let now = Utc::now().naive_utc();
    let admin_user = user::ActiveModel {
        user_id: Set(Uuid::new_v4()),
        full_name: Set(APP_CONFIG.admin_name.clone()),
        email: Set(admin_email.to_string()),
        password: Set(hashed_password),
        role: Set(RoleEnum::SuperAdmin),
        created_at: Set(now),
        updated_at: Set(now),
    };

    admin_user
        .insert(db)
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("Admin user created successfully");
    tracing::info!("  Email: {}", admin_email);
    tracing::warn!("Please change the default password after first login!");

    Ok(())
}
