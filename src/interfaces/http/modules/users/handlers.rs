//! User management API handlers
//!
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CreateUserRequest, ListUsersParams, UpdateUserRequest};
use crate::application::identity::{RoleResponse, ServiceError, UserResponse, UserService};
use crate::domain::UserRepositoryInterface;
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::shared::PaginationParams;

pub type SharedUserService = Arc<UserService<dyn UserRepositoryInterface>>;

/// User handler state — the service is shared behind a trait object so any
/// repository backend can be plugged in.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: SharedUserService,
}

type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Every service failure is an upstream storage failure: 417.
fn service_error(e: ServiceError) -> ApiError {
    (
        StatusCode::EXPECTATION_FAILED,
        Json(ApiResponse::error(e.to_string())),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "Role list", body = PaginatedResponse<RoleResponse>),
        (status = 417, description = "Storage failure")
    )
)]
pub async fn list_roles(
    State(state): State<UserHandlerState>,
) -> Result<Json<PaginatedResponse<RoleResponse>>, ApiError> {
    let roles = state.user_service.list_roles().await.map_err(service_error)?;
    Ok(Json(roles.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserResponse>),
        (status = 400, description = "Malformed query"),
        (status = 417, description = "Storage failure")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<ListUsersParams>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let params: PaginationParams = params.into();
    let users = state
        .user_service
        .list_users(&params)
        .await
        .map_err(service_error)?;
    Ok(Json(users.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed id"),
        (status = 417, description = "Storage failure, including unknown id")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(id).await.map_err(service_error)?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/by-username/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponse>),
        (status = 417, description = "Storage failure, including unknown username")
    )
)]
pub async fn get_user_by_username(
    State(state): State<UserHandlerState>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 417, description = "Storage failure, including duplicate username"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state
        .user_service
        .create_user(request.into())
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed id"),
        (status = 417, description = "Storage failure, including unknown id"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_user(id, request.into())
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted, last known state returned", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed id"),
        (status = 417, description = "Storage failure, including unknown id")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.delete_user(id).await.map_err(service_error)?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/invalidate",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User invalidated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed id"),
        (status = 417, description = "Storage failure, including unknown id")
    )
)]
pub async fn invalidate_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .invalidate_user(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(user)))
}
