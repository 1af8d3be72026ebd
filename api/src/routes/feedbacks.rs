//! `/api/feedbacks` route group.
//!
//! - `POST /feedbacks`: leave feedback (enrolled student)
//! - `GET /feedbacks?class_id=`: a class's feedback (public)
//! - `PATCH /feedbacks/{feedback_id}`: edit (author/admin)
//! - `DELETE /feedbacks/{feedback_id}`: remove (author/admin)

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::format_validation_errors;
use serde::Deserialize;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::stored_role;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
struct CreateFeedbackRequest {
    class_id: i64,
    #[validate(length(min = 1, max = 200, message = "assignment_title is required"))]
    assignment_title: String,
    #[validate(length(min = 1, max = 2000, message = "feedback text is required"))]
    feedback: String,
    rating: f64,
}

#[derive(Debug, Deserialize)]
struct ListFeedbacksQuery {
    class_id: i64,
}

#[derive(Debug, Deserialize, Default)]
struct EditFeedbackRequest {
    feedback: Option<String>,
    rating: Option<f64>,
}

/// POST /api/feedbacks
///
/// Leaves feedback on an assignment. The caller must be enrolled in the
/// class, and one feedback per (class, student, assignment title).
///
/// ### Errors
/// - 400: validation failure, or rating out of range
/// - 403: not enrolled
/// - 409: duplicate feedback
async fn create_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let feedback = state
        .feedbacks()
        .create(
            req.class_id,
            user.email(),
            req.assignment_title,
            req.feedback,
            req.rating,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            feedback,
            "Feedback submitted successfully",
        )),
    )
        .into_response())
}

/// GET /api/feedbacks?class_id=
///
/// A class's feedback. Public.
async fn list_feedbacks(
    State(state): State<AppState>,
    Query(query): Query<ListFeedbacksQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let feedbacks = state.feedbacks().list_by_class(query.class_id).await?;
    Ok(Json(ApiResponse::success(
        feedbacks,
        "Feedbacks retrieved successfully",
    )))
}

/// PATCH /api/feedbacks/{feedback_id}
///
/// Edits the text or rating. Author or admin.
async fn edit_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<EditFeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    let feedback = state
        .feedbacks()
        .update(
            feedback_id,
            user.email(),
            caller_role,
            req.feedback,
            req.rating,
        )
        .await?;
    Ok(Json(ApiResponse::success(
        feedback,
        "Feedback updated successfully",
    )))
}

/// DELETE /api/feedbacks/{feedback_id}
///
/// Removes feedback. Author or admin.
async fn delete_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    state
        .feedbacks()
        .delete(feedback_id, user.email(), caller_role)
        .await?;
    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Feedback deleted successfully",
    )))
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_feedback))
        .route("/", get(list_feedbacks))
        .route(
            "/{feedback_id}",
            axum::routing::patch(edit_feedback).delete(delete_feedback),
        )
}
