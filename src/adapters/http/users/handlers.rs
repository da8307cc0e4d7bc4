//! HTTP handlers for user roster endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::users::{
    DeleteUserCommand, DeleteUserHandler, GetUserHandler, GetUserQuery, ListUsersHandler,
    ListUsersQuery, UpdateUserCommand, UpdateUserHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::users::{UserError, UserUpdate};
use crate::ports::UserRepository;

use super::super::error::ErrorResponse;
use super::super::identity::AuthenticatedUser;
use super::dto::{UpdateUserRequest, UserResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for user roster endpoints.
#[derive(Clone)]
pub struct UsersAppState {
    pub users: Arc<dyn UserRepository>,
}

impl UsersAppState {
    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users - List all users (admin only)
pub async fn list_users(
    State(state): State<UsersAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, UserApiError> {
    let users = state
        .list_users_handler()
        .handle(ListUsersQuery {
            requester_role: user.role,
        })
        .await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/users/:id - Read one user (self or admin)
pub async fn get_user(
    State(state): State<UsersAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UserApiError> {
    let target_user_id = parse_user_id(&id)?;

    let record = state
        .get_user_handler()
        .handle(GetUserQuery {
            requester_id: user.user_id,
            requester_role: user.role,
            target_user_id,
        })
        .await?;

    Ok(Json(UserResponse::from(record)))
}

/// PUT /api/users/:id - Update a user (self or admin; role change admin only)
pub async fn update_user(
    State(state): State<UsersAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let target_user_id = parse_user_id(&id)?;

    let record = state
        .update_user_handler()
        .handle(UpdateUserCommand {
            requester_id: user.user_id,
            requester_role: user.role,
            target_user_id,
            update: UserUpdate {
                username: request.username,
                email: request.email,
            },
            role: request.role,
        })
        .await?;

    Ok(Json(UserResponse::from(record)))
}

/// DELETE /api/users/:id - Delete a user (admin only)
pub async fn delete_user(
    State(state): State<UsersAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UserApiError> {
    let target_user_id = parse_user_id(&id)?;

    state
        .delete_user_handler()
        .handle(DeleteUserCommand {
            requester_role: user.role,
            target_user_id,
        })
        .await?;

    Ok(StatusCode::OK)
}

/// A malformed id cannot name any user: report it as not found.
fn parse_user_id(raw: &str) -> Result<UserId, UserApiError> {
    raw.parse::<UserId>()
        .map_err(|_| UserApiError(UserError::NotFound(UserId::new())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts user errors to HTTP responses.
pub struct UserApiError(UserError);

impl From<UserError> for UserApiError {
    fn from(err: UserError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::NotAuthorized => StatusCode::FORBIDDEN,
            UserError::RoleChangeForbidden => StatusCode::FORBIDDEN,
            UserError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            UserError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "user request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
