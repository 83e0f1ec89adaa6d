use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{APP_CONFIG, JWT_EXPIRY_SECONDS};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;

/// Bearer-token payload. `school_id` is absent for super admins (no tenant
/// filter); `teacher_id` is present only for teacher logins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub role: RoleEnum,
    pub school_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config() -> Self {
        Self::new(&APP_CONFIG.jwt_secret)
    }

    pub fn issue_token(
        &self,
        sub: Uuid,
        email: &str,
        name: &str,
        role: RoleEnum,
        school_id: Option<Uuid>,
        teacher_id: Option<Uuid>,
    ) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub,
            email: email.to_string(),
            name: name.to_string(),
            role,
            school_id,
            teacher_id,
            iat: now,
            exp: now + JWT_EXPIRY_SECONDS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, ServiceError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let manager = JwtManager::new("test-secret");
        let teacher_id = Uuid::new_v4();
        let school_id = Uuid::new_v4();

        let token = manager
            .issue_token(
                teacher_id,
                "jane@school.test",
                "Jane Doe",
                RoleEnum::Teacher,
                Some(school_id),
                Some(teacher_id),
            )
            .unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.sub, teacher_id);
        assert_eq!(claims.email, "jane@school.test");
        assert_eq!(claims.role, RoleEnum::Teacher);
        assert_eq!(claims.school_id, Some(school_id));
        assert_eq!(claims.teacher_id, Some(teacher_id));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let manager = JwtManager::new("secret-a");
        let token = manager
            .issue_token(
                Uuid::new_v4(),
                "admin@school.test",
                "Admin",
                RoleEnum::SchoolAdmin,
                Some(Uuid::new_v4()),
                None,
            )
            .unwrap();

        let other = JwtManager::new("secret-b");
        assert!(other.verify_token(&token).is_err());
    }
}
