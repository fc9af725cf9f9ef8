//! User handlers.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::{AppError, AppResult};
use domain::{NewUser, User, UserId, UserPatch};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    #[schema(example = "New User")]
    pub name: String,
    /// Email address
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "new.user@example.com")]
    pub email: String,
    /// Role, defaults to `viewer`
    #[schema(example = "editor")]
    pub role: Option<String>,
    /// Team, defaults to `General`
    #[schema(example = "engineering")]
    pub team: Option<String>,
    /// Status, defaults to `active`
    #[schema(example = "active")]
    pub status: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            team: req.team,
            status: req.status,
        }
    }
}

/// Partial user update; omitted fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "non_blank", message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[schema(example = "admin")]
    pub role: Option<String>,
    pub team: Option<String>,
    #[schema(example = "inactive")]
    pub status: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            team: req.team,
            status: req.status,
        }
    }
}

/// Reset response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub message: String,
    pub count: usize,
    pub users: Vec<User>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Identifiers that do not parse can never match a stored user.
fn parse_id(raw: &str) -> AppResult<UserId> {
    raw.parse().map_err(|_| AppError::not_found("User"))
}

const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
const RESET_METHODS: &str = "POST, OPTIONS";
const MEMBER_METHODS: &str = "GET, PUT, PATCH, DELETE, OPTIONS";

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .fallback(|method: Method| method_not_allowed(method, COLLECTION_METHODS)),
        )
        .route(
            "/reset",
            post(reset_users)
                .fallback(|method: Method| method_not_allowed(method, RESET_METHODS)),
        )
        .route(
            "/:id",
            get(get_user)
                .patch(update_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(|method: Method| method_not_allowed(method, MEMBER_METHODS)),
        )
}

/// Answers methods a route does not serve; OPTIONS always succeeds.
pub async fn method_not_allowed(method: Method, allow: &'static str) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::method_not_allowed(method.as_str(), allow).into_response()
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<User>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.users.get_user(parse_id(&id)?).await?;
    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.users.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update user (PUT is accepted as an alias)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .users
        .update_user(parse_id(&id)?, payload.into())
        .await?;
    Ok(Json(user))
}

/// Delete user permanently
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.users.delete_user(parse_id(&id)?).await?;
    Ok(Json(user))
}

/// Restore the default user list
#[utoipa::path(
    post,
    path = "/api/users/reset",
    tag = "Users",
    responses(
        (status = 200, description = "Users reset to defaults", body = ResetResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn reset_users(State(state): State<AppState>) -> AppResult<Json<ResetResponse>> {
    let users = state.users.reset_users().await?;
    Ok(Json(ResetResponse {
        message: "Users reset to default".to_string(),
        count: users.len(),
        users,
    }))
}
