use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::stored_role;
use crate::state::AppState;

/// DELETE /api/classes/{class_id}
///
/// Removes a class. Owner or admin.
///
/// ### Errors
/// - 403: caller is neither the owner nor an admin
/// - 404: no such class
pub async fn delete_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    state
        .classes()
        .delete(class_id, user.email(), caller_role)
        .await?;
    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Class deleted successfully",
    )))
}
