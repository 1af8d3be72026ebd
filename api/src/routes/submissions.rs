//! `/api/submissions` route group.
//!
//! - `POST /submissions`: hand in work (enrolled student, before deadline)
//! - `GET /submissions?assignment_id=` / `?class_id=`: (class teacher/admin)
//! - `GET /submissions/mine`: the caller's own submissions
//! - `PATCH /submissions/grade/{submission_id}`: record marks (class teacher)
//! - `PATCH /submissions/viewed/{submission_id}`: idempotent view marker

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, patch, post},
};
use common::format_validation_errors;
use db::models::user::Role;
use serde::Deserialize;
use serde_json::Value;
use services::WorkflowError;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::auth::guards::allow_authenticated;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::stored_role;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
struct SubmitRequest {
    assignment_id: i64,
    #[validate(length(min = 1, message = "content is required"))]
    content: String,
}

#[derive(Debug, Deserialize, Default)]
struct ListSubmissionsQuery {
    assignment_id: Option<i64>,
    class_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GradeRequest {
    /// Accepted as a JSON number or a numeric string; either way it must
    /// parse to a finite value.
    marks: Value,
    review: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ViewedRequest {
    viewed_hash: String,
}

fn parse_marks(value: &Value) -> Result<f64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| WorkflowError::bad_request("marks must be a number").into())
}

/// POST /api/submissions
///
/// Records the caller's submission for an assignment.
///
/// ### Errors
/// - 403: not enrolled in the assignment's class
/// - 404: no such assignment
/// - 409: deadline has passed
async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let submission = state
        .grading()
        .submit(req.assignment_id, user.email(), req.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            submission,
            "Submission recorded successfully",
        )),
    )
        .into_response())
}

/// GET /api/submissions?assignment_id= / ?class_id=
///
/// Lists submissions for grading. Restricted to the class's teacher and
/// admins.
async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    let grading = state.grading();

    let require_class_access = async |class_id: i64| -> Result<(), ApiError> {
        if caller_role == Role::Admin {
            return Ok(());
        }
        let class = state.classes().get(class_id).await?;
        if class.teacher_email.eq_ignore_ascii_case(user.email()) {
            Ok(())
        } else {
            Err(WorkflowError::forbidden(
                "Only the class teacher or an admin may list submissions",
            )
            .into())
        }
    };

    let listing = if let Some(assignment_id) = query.assignment_id {
        let assignment = grading.find_assignment(assignment_id).await?;
        require_class_access(assignment.class_id).await?;
        grading.list_by_assignment(assignment_id).await?
    } else if let Some(class_id) = query.class_id {
        require_class_access(class_id).await?;
        grading.list_by_class(class_id).await?
    } else {
        return Err(
            WorkflowError::bad_request("assignment_id or class_id query is required").into(),
        );
    };

    Ok(Json(ApiResponse::success(
        listing,
        "Submissions retrieved successfully",
    ))
    .into_response())
}

/// GET /api/submissions/mine
///
/// The caller's own submissions across all classes.
async fn my_submissions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.grading().list_by_student(user.email()).await?;
    Ok(Json(ApiResponse::success(
        listing,
        "Submissions retrieved successfully",
    )))
}

/// PATCH /api/submissions/grade/{submission_id}
///
/// Records marks and an optional review. Class teacher or admin.
///
/// ### Errors
/// - 400: marks not a finite number
/// - 403: caller does not teach the class
/// - 404: no such submission
async fn grade_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
    user: AuthUser,
    Json(req): Json<GradeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let marks = parse_marks(&req.marks)?;
    let caller_role = stored_role(&state, &user).await?;

    let submission = state
        .grading()
        .grade(submission_id, user.email(), caller_role, marks, req.review)
        .await?;
    Ok(Json(ApiResponse::success(
        submission,
        "Submission graded successfully",
    )))
}

/// PATCH /api/submissions/viewed/{submission_id}
///
/// Marks a graded submission as seen. Idempotent.
async fn mark_viewed(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<ViewedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .grading()
        .mark_viewed(submission_id, req.viewed_hash)
        .await?;
    Ok(Json(ApiResponse::success(
        submission,
        "Submission marked as viewed",
    )))
}

pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit))
        .route("/", get(list_submissions))
        .route("/mine", get(my_submissions))
        .route("/grade/{submission_id}", patch(grade_submission))
        .route("/viewed/{submission_id}", patch(mark_viewed))
        .route_layer(from_fn(allow_authenticated))
}
