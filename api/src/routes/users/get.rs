use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{require_role, require_self_or_admin, stored_role};
use crate::state::AppState;

/// GET /api/users
///
/// Lists every account. Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let users = state.users().list().await?;
    Ok(Json(ApiResponse::success(
        users,
        "Users retrieved successfully",
    )))
}

/// GET /api/users/{email}/role
///
/// Returns the stored role for an email. Callers may ask about themselves;
/// admins may ask about anyone.
pub async fn get_user_role(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    require_self_or_admin(&user, caller_role, &email)?;

    let role = state.users().role_for_email(&email).await?;
    Ok(Json(ApiResponse::success(
        json!({ "email": email.to_lowercase(), "role": role }),
        "Role retrieved successfully",
    )))
}
