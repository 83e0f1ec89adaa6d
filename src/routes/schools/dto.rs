use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::school;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSchoolRequest {
    #[schema(example = "Greenhill Academy")]
    pub name: String,

    #[schema(example = "office@greenhill.edu")]
    pub email: String,

    #[schema(example = "0712345678")]
    pub phone: Option<String>,

    #[schema(example = "12 Hill Road, Kampala")]
    pub address: Option<String>,

    #[schema(example = "admin@greenhill.edu")]
    pub admin_email: Option<String>,

    #[schema(example = "password123")]
    pub admin_password: Option<String>,

    #[schema(example = "Grace Nankya")]
    pub admin_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub admin_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolResponse {
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub admin_email: Option<String>,
    pub admin_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<school::Model> for SchoolResponse {
    fn from(model: school::Model) -> Self {
        Self {
            school_id: model.school_id,
            name: model.name,
            email: model.email,
            admin_email: model.admin_email,
            admin_name: model.admin_name,
            phone: model.phone,
            address: model.address,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolListResponse {
    pub total: usize,
    pub schools: Vec<SchoolResponse>,
}
