//! Staff management API handlers
//!
//! Admin-only account administration; the router's admin gate runs before
//! any of these handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, UserDto};
use crate::application::IdentityService;
use crate::domain::{DomainError, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

/// Staff handler state
#[derive(Clone)]
pub struct StaffHandlerState {
    pub identity: Arc<IdentityService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = ApiResponse<Vec<UserDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<StaffHandlerState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, (StatusCode, Json<ApiResponse<Vec<UserDto>>>)> {
    let users = state
        .identity
        .list_users()
        .await
        .map_err(|e| domain_error(&e))?;

    let items: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<StaffHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let role = UserRole::parse(&request.role).ok_or_else(|| {
        domain_error(&DomainError::Validation(format!(
            "Unknown role '{}', expected 'admin' or 'staff'",
            request.role
        )))
    })?;

    let user = state
        .identity
        .create_user(&request.username, &request.password, role)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Admin accounts cannot be deleted")
    )
)]
pub async fn delete_user(
    State(state): State<StaffHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .identity
        .delete_user(&id)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(())))
}
