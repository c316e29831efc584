//! User Handlers
//!
//! Registration, authentication and account administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use validator::Validate;

use super::parse_id;
use crate::domain::models::{Permission, UserId};
use crate::infrastructure::driving_adapters::api_rest::dto::{
    AuthResponseDto, CredentialsDto, UpdatePermissionDto, UserResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::auth::issue_token;
use crate::infrastructure::driving_adapters::api_rest::middleware::{AdminUser, AuthUser};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/auth", post(authenticate_user))
        .route("/logout", post(logout))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/permissions", patch(update_permission))
}

/// POST /users - Register a new account
///
/// # Responses
///
/// * 201 Created - Account created with `user` permission
/// * 400 Bad Request - Login or password rules violated
/// * 409 Conflict - Login already taken
#[axum::debug_handler]
async fn register_user(
    State(state): State<AppState>,
    Json(dto): Json<CredentialsDto>,
) -> Result<(StatusCode, Json<UserResponseDto>), ApiError> {
    dto.validate()?;

    let user = state.users.register.execute(&dto.login, &dto.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponseDto::from(user))))
}

/// POST /users/auth - Open a session
///
/// # Responses
///
/// * 200 OK - Session opened, body carries the bearer token
/// * 401 Unauthorized - Unknown login or wrong password
#[axum::debug_handler]
async fn authenticate_user(
    State(state): State<AppState>,
    Json(dto): Json<CredentialsDto>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    dto.validate()?;

    let (user, session) = state.users.authenticate.execute(&dto.login, &dto.password).await?;
    let token = issue_token(&state.config.jwt, &user, &session)?;

    Ok(Json(AuthResponseDto::new(user, &session, token)))
}

/// POST /users/logout - Close the caller's session
#[axum::debug_handler]
async fn logout(AuthUser(user): AuthUser, State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.users.logout.execute(&user.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn get_current_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let profile = state.users.profile.execute(&user.user_id).await?;
    Ok(Json(profile.into()))
}

/// GET /users/:id - Profile of any user
#[axum::debug_handler]
async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let user_id: UserId = parse_id(&id)?;
    let user = state.users.profile.execute(&user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /users/:id/permissions - Change a user's permission
///
/// # Authentication
///
/// Requires an admin session.
///
/// # Responses
///
/// * 200 OK - Permission changed
/// * 400 Bad Request - Unknown or non-assignable permission
/// * 403 Forbidden - Caller is not an admin
/// * 404 Not Found - User does not exist
#[axum::debug_handler]
async fn update_permission(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdatePermissionDto>,
) -> Result<Json<UserResponseDto>, ApiError> {
    dto.validate()?;

    let user_id: UserId = parse_id(&id)?;
    let permission: Permission = dto.permission.parse()?;
    let user = state.users.update_permission.execute(&user_id, permission).await?;

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, permission = %permission, "Permission changed");
    Ok(Json(user.into()))
}

/// DELETE /users/:id - Remove an account with its sessions, playlists and history
#[axum::debug_handler]
async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id: UserId = parse_id(&id)?;
    state.users.delete.execute(&user_id).await?;

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
