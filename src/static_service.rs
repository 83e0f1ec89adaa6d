use once_cell::sync::OnceCell;
use sea_orm::{Database, DatabaseConnection};

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn get_database_connection() -> &'static DatabaseConnection {
    if DATABASE_CONNECTION.get().is_none() {
        let db = Database::connect(APP_CONFIG.database_url.as_str())
            .await
            .expect("Failed to connect to database");
        let _ = DATABASE_CONNECTION.set(db);
    }

    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}
