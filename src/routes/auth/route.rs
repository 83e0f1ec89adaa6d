use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{
    AuthenticatedUser, ChangePasswordRequest, ChangePasswordResponse, LoginRequest, LoginResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{SchoolRepository, TeacherRepository, UserRepository};
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/change-password", post(change_password))
}

fn verify_password(password: &str, hash: &str) -> Result<(), ServiceError> {
    let valid = bcrypt::verify(password, hash)
        .map_err(|e| ServiceError::Internal(format!("Password verification error: {}", e)))?;
    if !valid {
        return Err(ServiceError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }
    Ok(())
}

/// Login endpoint - returns JWT token
///
/// One endpoint, three principals: super-admin users, school admins (the
/// admin credentials on the school row) and teachers, tried in that order.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ServiceError> {
    let jwt = JwtManager::from_config();

    if let Some(user) = UserRepository::new().find_by_email(&payload.email).await? {
        verify_password(&payload.password, &user.password)?;

        let token = jwt.issue_token(
            user.user_id,
            &user.email,
            &user.full_name,
            user.role.clone(),
            None,
            None,
        )?;

        return Ok((
            StatusCode::OK,
            Json(LoginResponse {
                user: AuthenticatedUser {
                    id: user.user_id,
                    email: user.email,
                    name: user.full_name,
                    role: user.role,
                    school_id: None,
                    teacher_id: None,
                },
                access_token: token,
            }),
        ));
    }

    if let Some(school) = SchoolRepository::new()
        .find_active_by_admin_email(&payload.email)
        .await?
    {
        let hash = school.admin_password.as_deref().ok_or_else(|| {
            ServiceError::Unauthorized("Invalid email or password".to_string())
        })?;
        verify_password(&payload.password, hash)?;

        let admin_email = school.admin_email.clone().unwrap_or_default();
        let admin_name = school.admin_name.clone().unwrap_or_else(|| school.name.clone());

        let token = jwt.issue_token(
            school.school_id,
            &admin_email,
            &admin_name,
            RoleEnum::SchoolAdmin,
            Some(school.school_id),
            None,
        )?;

        return Ok((
            StatusCode::OK,
            Json(LoginResponse {
                user: AuthenticatedUser {
                    id: school.school_id,
                    email: admin_email,
                    name: admin_name,
                    role: RoleEnum::SchoolAdmin,
                    school_id: Some(school.school_id),
                    teacher_id: None,
                },
                access_token: token,
            }),
        ));
    }

    if let Some(teacher) = TeacherRepository::new()
        .find_active_by_email(&payload.email)
        .await?
    {
        verify_password(&payload.password, &teacher.password)?;

        let token = jwt.issue_token(
            teacher.teacher_id,
            &teacher.email,
            &teacher.name,
            RoleEnum::Teacher,
            Some(teacher.school_id),
            Some(teacher.teacher_id),
        )?;

        return Ok((
            StatusCode::OK,
            Json(LoginResponse {
                user: AuthenticatedUser {
                    id: teacher.teacher_id,
                    email: teacher.email,
                    name: teacher.name,
                    role: RoleEnum::Teacher,
                    school_id: Some(teacher.school_id),
                    teacher_id: Some(teacher.teacher_id),
                },
                access_token: token,
            }),
        ));
    }

    Err(ServiceError::Unauthorized(
        "Invalid email or password".to_string(),
    ))
}

/// Change the caller's own password
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ChangePasswordResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn change_password(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<(StatusCode, Json<ChangePasswordResponse>), ServiceError> {
    let new_hash = bcrypt::hash(&payload.new_password, bcrypt::DEFAULT_COST)?;

    match auth_claims.role {
        RoleEnum::SuperAdmin => {
            let user_repo = UserRepository::new();
            let user = user_repo
                .find_by_id(auth_claims.sub)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
            verify_password(&payload.old_password, &user.password)?;
            user_repo.update_password(user.user_id, new_hash).await?;
        }
        RoleEnum::SchoolAdmin => {
            let school_repo = SchoolRepository::new();
            let school = school_repo.find_by_id(auth_claims.sub).await?;
            let hash = school.admin_password.as_deref().ok_or_else(|| {
                ServiceError::Unauthorized("Invalid email or password".to_string())
            })?;
            verify_password(&payload.old_password, hash)?;
            school_repo
                .update_admin_password(school.school_id, new_hash)
                .await?;
        }
        RoleEnum::Teacher => {
            let teacher_repo = TeacherRepository::new();
            let teacher = teacher_repo
                .find_by_id(auth_claims.sub)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Teacher not found".to_string()))?;
            verify_password(&payload.old_password, &teacher.password)?;
            teacher_repo
                .update_password(teacher.teacher_id, new_hash)
                .await?;
        }
    }

    Ok((
        StatusCode::OK,
        Json(ChangePasswordResponse {
            message: "Password changed successfully".to_string(),
        }),
    ))
}
