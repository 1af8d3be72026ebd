//! `/api/teachers` route group: the accepted-teacher roster.

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, patch},
};

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::response::{ApiError, ApiResponse, Empty};
use crate::state::AppState;

/// GET /api/teachers
///
/// The roster of accepted teachers. Authenticated.
async fn list_teachers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let teachers = state.teacher_workflow().roster().await?;
    Ok(Json(ApiResponse::success(
        teachers,
        "Teachers retrieved successfully",
    )))
}

/// PATCH /api/teachers/deactivate/{teacher_id}
///
/// Removes a teacher from the roster and reverts the owning user to
/// `student`, atomically. Admin only (route guard).
///
/// ### Errors
/// - 404: no such teacher
async fn deactivate_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.teacher_workflow().deactivate(teacher_id).await?;
    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Teacher deactivated",
    )))
}

pub fn teacher_routes(app_state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", get(list_teachers))
        .route_layer(from_fn(allow_authenticated));

    let admin = Router::new()
        .route("/deactivate/{teacher_id}", patch(deactivate_teacher))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    authenticated.merge(admin)
}
