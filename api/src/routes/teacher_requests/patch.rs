use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::require_role;
use services::WorkflowError;
use crate::state::AppState;

/// PATCH /api/teacher-requests/approve/{request_id}
///
/// Accepts an application: promotes the user to teacher, materializes the
/// roster row, and deletes the request atomically. Admin only.
///
/// ### Errors
/// - 404: request absent, or no user account for its email
pub async fn approve_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let teacher = state.teacher_workflow().approve(request_id).await?;
    Ok(Json(ApiResponse::success(
        teacher,
        "Teacher request approved",
    )))
}

/// PATCH /api/teacher-requests/reject/{request_id}
///
/// Marks an application rejected; the user's role is untouched. Admin only.
pub async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let request = state.teacher_workflow().reject(request_id).await?;
    Ok(Json(ApiResponse::success(
        request,
        "Teacher request rejected",
    )))
}

/// PATCH /api/teacher-requests/reapply/{email}
///
/// Moves the caller's rejected request back to pending. Strictly owner-only:
/// admins cannot reapply on someone else's behalf.
///
/// ### Errors
/// - 403: asking on behalf of someone else
/// - 409: the request is not in the rejected state
pub async fn reapply(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    if !user.email().eq_ignore_ascii_case(&email) {
        return Err(WorkflowError::forbidden("Only the request owner may reapply").into());
    }

    state.teacher_workflow().reapply(&email).await?;
    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Teacher request reopened",
    )))
}
