use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use validator::Validate;

use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::classes::common::CreateClassRequest;
use crate::routes::common::require_role;
use crate::state::AppState;

/// POST /api/classes
///
/// Creates a class owned by the calling teacher. Status always starts at
/// `pending`; only an admin approval makes it public.
///
/// ### Errors
/// - 400: validation failure
/// - 403: caller is not a teacher
pub async fn create_class(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&state, &user, Role::Teacher).await?;
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let class = state
        .classes()
        .create(req.into_new_class(user.email()))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(class, "Class created successfully")),
    )
        .into_response())
}
