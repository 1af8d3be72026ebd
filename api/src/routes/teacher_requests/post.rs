use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::teacher_requests::common::SubmitRequestBody;
use crate::state::AppState;

/// POST /api/teacher-requests
///
/// Files a teacher application for the authenticated caller. The applicant
/// email always comes from the token, never the body.
///
/// ### Errors
/// - 400: validation failure
/// - 409: a live request already exists for this email
pub async fn submit_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SubmitRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let request = state
        .teacher_workflow()
        .submit(user.email(), req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            request,
            "Teacher request submitted successfully",
        )),
    )
        .into_response())
}
