//! `/api/wishlist` route group.
//!
//! Wishlist and enrollment are exclusive for a (class, user) pair: adding
//! conflicts once enrolled, and enrolling clears the pair's wishlist row.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
};
use db::models::user::Role;
use serde::Deserialize;

use crate::auth::claims::AuthUser;
use crate::auth::guards::allow_authenticated;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::{require_self_or_admin, stored_role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AddWishlistRequest {
    class_id: i64,
}

/// POST /api/wishlist
///
/// Adds a class to the caller's wishlist.
///
/// ### Errors
/// - 404: no such class
/// - 409: already wishlisted, or already enrolled
async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AddWishlistRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .enrollments()
        .add_to_wishlist(req.class_id, user.email())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(item, "Added to wishlist")),
    ))
}

/// GET /api/wishlist/{email}
///
/// A user's wishlist. Self or admin.
async fn list_items(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    require_self_or_admin(&user, caller_role, &email)?;

    let items = state.enrollments().wishlist_for(&email).await?;
    Ok(Json(ApiResponse::success(
        items,
        "Wishlist retrieved successfully",
    )))
}

/// DELETE /api/wishlist/{item_id}
///
/// Removes a wishlist entry. Owner or admin.
async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;
    state
        .enrollments()
        .remove_from_wishlist(item_id, user.email(), caller_role == Role::Admin)
        .await?;
    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Removed from wishlist",
    )))
}

pub fn wishlist_routes() -> Router<AppState> {
    // GET takes an email, DELETE an item id; one registration because both
    // occupy the same path position.
    Router::new()
        .route("/", post(add_item))
        .route("/{key}", get(list_items).delete(remove_item))
        .route_layer(from_fn(allow_authenticated))
}
