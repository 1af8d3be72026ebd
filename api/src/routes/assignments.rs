//! `/api/assignments` route group.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use serde::Deserialize;
use services::grading::NewAssignment;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::stored_role;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
struct CreateAssignmentRequest {
    class_id: i64,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    title: String,
    description: Option<String>,
    deadline: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ListAssignmentsQuery {
    class_id: i64,
}

/// POST /api/assignments
///
/// Creates an assignment on a class the caller teaches.
///
/// ### Errors
/// - 400: validation failure
/// - 403: caller does not own the class
/// - 404: no such class
async fn create_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let caller_role = stored_role(&state, &user).await?;
    let assignment = state
        .grading()
        .create_assignment(
            user.email(),
            caller_role,
            NewAssignment {
                class_id: req.class_id,
                title: req.title,
                description: req.description,
                deadline: req.deadline,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            assignment,
            "Assignment created successfully",
        )),
    )
        .into_response())
}

/// GET /api/assignments?class_id=
///
/// A class's assignments. Authenticated.
async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let assignments = state.grading().list_assignments(query.class_id).await?;
    Ok(Json(ApiResponse::success(
        assignments,
        "Assignments retrieved successfully",
    )))
}

pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/", get(list_assignments))
}
