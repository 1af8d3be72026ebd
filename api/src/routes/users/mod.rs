//! `/api/users` route group.
//!
//! - `POST /users`: idempotent registration (public)
//! - `GET /users`: list all accounts (admin)
//! - `GET /users/{email}/role`: stored role lookup (self or admin)
//! - `PATCH /users/make-admin/{user_id}`: promote (admin)
//! - `DELETE /users/{user_id}`: delete + revoke identity account (admin)
//!
//! Registration shares the root path with the admin listing, so role checks
//! live in the handlers rather than a route layer.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use self::delete::delete_user;
use self::get::{get_user_role, list_users};
use self::patch::make_admin;
use self::post::register_user;
use crate::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/", get(list_users))
        .route("/make-admin/{user_id}", patch(make_admin))
        .route("/{user_id}", delete(delete_user))
        .route("/{user_id}/role", get(get_user_role))
}
