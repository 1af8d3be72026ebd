use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use db::models::user::Role;
use services::WorkflowError;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{require_role, require_self_or_admin, stored_role};
use crate::state::AppState;

/// GET /api/teacher-requests
///
/// Lists requests awaiting a decision plus rejected ones eligible for
/// reapply. Admin only.
pub async fn list_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Admin).await?;
    let requests = state.teacher_workflow().list_open().await?;
    Ok(Json(ApiResponse::success(
        requests,
        "Teacher requests retrieved successfully",
    )))
}

/// GET /api/teacher-requests/{email}
///
/// Returns the live request for an email. Self or admin.
///
/// ### Errors
/// - 404: no request on file for this email
pub async fn get_request(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    require_self_or_admin(&user, caller_role, &email)?;

    let request = state
        .teacher_workflow()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| WorkflowError::not_found("No teacher request for this email"))?;
    Ok(Json(ApiResponse::success(
        request,
        "Teacher request retrieved successfully",
    )))
}
