use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::require_role;
use crate::state::AppState;

/// DELETE /api/users/{user_id}
///
/// Removes the account and asks the identity provider to revoke its
/// credentials. Admin only.
///
/// The local row is deleted first; if the provider then refuses the
/// revocation the error is surfaced so the admin can retry provider-side.
///
/// ### Errors
/// - 404: no such user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &caller, Role::Admin).await?;
    let deleted = state.users().delete(user_id).await?;
    state.identity().delete_account(&deleted.email).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "User deleted successfully",
    )))
}
