use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::classes::common::EditClassRequest;
use crate::routes::common::{require_role, stored_role};
use crate::state::AppState;

/// PATCH /api/classes/{class_id}
///
/// Applies field updates and always resets the class to `pending` for
/// re-review. Owner or admin.
///
/// ### Errors
/// - 400: negative seats or price
/// - 403: caller is neither the owner nor an admin
/// - 404: no such class
pub async fn edit_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<EditClassRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    let class = state
        .classes()
        .edit(class_id, user.email(), caller_role, req.into())
        .await?;
    Ok(Json(ApiResponse::success(
        class,
        "Class updated; pending re-approval",
    )))
}

/// PATCH /api/classes/approve/{class_id}
///
/// Publishes a class to the catalog. Admin only.
pub async fn approve_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let class = state.classes().approve(class_id).await?;
    Ok(Json(ApiResponse::success(class, "Class approved")))
}

/// PATCH /api/classes/reject/{class_id}
///
/// Rejects a class. Admin only.
pub async fn reject_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let class = state.classes().reject(class_id).await?;
    Ok(Json(ApiResponse::success(class, "Class rejected")))
}
