//! `/api/enrollments` route group: the enrollment + seat ledger.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
};
use db::models::user::Role;
use serde::{Deserialize, Serialize};
use serde_json::json;
use services::WorkflowError;

use crate::auth::claims::AuthUser;
use crate::auth::guards::allow_authenticated;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{require_self_or_admin, stored_role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct EnrollRequest {
    class_id: i64,
}

#[derive(Debug, Serialize)]
struct EnrollmentReceipt {
    enrollment: db::models::enrollment::Model,
    payment: db::models::payment::Model,
}

#[derive(Debug, Deserialize, Default)]
struct ListEnrollmentsQuery {
    email: Option<String>,
    class_id: Option<i64>,
}

/// POST /api/enrollments
///
/// Enrolls the caller into a class at the class's listed price. Runs the
/// seat-claim transaction: at most one enrollment per (class, student), and
/// seats never go below zero.
///
/// ### Errors
/// - 404: class absent or not visible to the caller
/// - 409: already enrolled, or no available seats
async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<EnrollRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    let class = state
        .classes()
        .get_visible(req.class_id, Some(user.email()), Some(caller_role))
        .await?;

    let (payment, enrollment) = state
        .enrollments()
        .enroll(class.id, user.email(), class.price)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            EnrollmentReceipt {
                enrollment,
                payment,
            },
            "Enrolled successfully",
        )),
    ))
}

/// GET /api/enrollments?email=&class_id=
///
/// Caller-scoped listing. `email` must be the caller's own unless admin;
/// `class_id` is restricted to the owning teacher and admins; no filter
/// returns the caller's own enrollments.
async fn list_enrollments(
    State(state): State<AppState>,
    Query(query): Query<ListEnrollmentsQuery>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    let ledger = state.enrollments();

    let listing = if let Some(class_id) = query.class_id {
        let class = state.classes().get(class_id).await?;
        if caller_role != Role::Admin && !class.teacher_email.eq_ignore_ascii_case(user.email()) {
            return Err(WorkflowError::forbidden(
                "Only the owning teacher or an admin may list a class's enrollments",
            )
            .into());
        }
        ledger.list_by_class(class_id).await?
    } else if let Some(email) = &query.email {
        require_self_or_admin(&user, caller_role, email)?;
        ledger.list_by_student(email).await?
    } else {
        ledger.list_by_student(user.email()).await?
    };

    Ok(Json(ApiResponse::success(
        json!({ "enrollments": listing }),
        "Enrollments retrieved successfully",
    )))
}

pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll))
        .route("/", get(list_enrollments))
        .route_layer(from_fn(allow_authenticated))
}
