use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use db::models::user::Role;

use crate::auth::extractors::MaybeAuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::classes::common::ListClassesQuery;
use crate::routes::common::stored_role;
use crate::state::AppState;

/// GET /api/classes
///
/// The catalog. Anonymous callers and students see approved classes only;
/// admins see everything; `?mine=true` returns the calling teacher's own
/// classes in every state.
pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ListClassesQuery>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let classes = state.classes();

    let listing = match &user {
        Some(caller) if query.mine => classes.list_by_teacher(caller.email()).await?,
        Some(caller) if stored_role(&state, caller).await? == Role::Admin => {
            classes.list_all().await?
        }
        _ => classes.list_public().await?,
    };

    Ok(Json(ApiResponse::success(
        listing,
        "Classes retrieved successfully",
    )))
}

/// GET /api/classes/{class_id}
///
/// Fetch honoring visibility: non-approved classes exist only for the
/// owning teacher and admins.
///
/// ### Errors
/// - 404: absent, or hidden from this caller
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let (email, role) = match &user {
        Some(caller) => (
            Some(caller.email().to_string()),
            Some(stored_role(&state, caller).await?),
        ),
        None => (None, None),
    };

    let class = state
        .classes()
        .get_visible(class_id, email.as_deref(), role)
        .await?;
    Ok(Json(ApiResponse::success(
        class,
        "Class retrieved successfully",
    )))
}
