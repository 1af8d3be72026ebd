use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use validator::Validate;

use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::users::common::{RegisterUserRequest, RegisteredUser};
use crate::state::AppState;

/// POST /api/users
///
/// Idempotent registration: a new email gets a `student` record, an existing
/// one returns the stored record untouched with `already_exists = true`.
/// Re-registering never demotes a promoted account.
///
/// ### Errors
/// - 400: invalid email
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let (user, already_exists) = state.users().register(&req.email, req.name).await?;
    let status = if already_exists {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let message = if already_exists {
        "User already registered"
    } else {
        "User registered successfully"
    };

    Ok((
        status,
        Json(ApiResponse::success(
            RegisteredUser {
                user,
                already_exists,
            },
            message,
        )),
    )
        .into_response())
}
