use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::require_role;
use crate::state::AppState;

/// PATCH /api/users/make-admin/{user_id}
///
/// Promotes an account to admin. Admin only.
///
/// ### Errors
/// - 404: no such user
pub async fn make_admin(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &caller, Role::Admin).await?;
    let user = state.users().make_admin(user_id).await?;
    Ok(Json(ApiResponse::success(user, "User promoted to admin")))
}
