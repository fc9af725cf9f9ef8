//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, StoreHealth};
use crate::handlers::user_handler::{CreateUserRequest, ResetResponse, UpdateUserRequest};
use domain::User;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::reset_users,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateUserRequest,
            ResetResponse,
            HealthResponse,
            StoreHealth,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
