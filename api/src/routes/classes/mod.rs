//! `/api/classes` route group.
//!
//! - `POST /classes`: create, lands in `pending` (teacher)
//! - `GET /classes`: catalog; approved only for the public, all for admins,
//!   `?mine=true` for the owning teacher
//! - `GET /classes/{class_id}`: visibility-aware fetch
//! - `PATCH /classes/{class_id}`: edit, resets status (owner/admin)
//! - `PATCH /classes/approve/{class_id}` / `reject/{class_id}`: (admin)
//! - `DELETE /classes/{class_id}`: (owner/admin)
//!
//! The catalog routes are public, so role checks live in the handlers.

use axum::{
    Router,
    routing::{get, patch, post},
};

use self::delete::delete_class;
use self::get::{get_class, list_classes};
use self::patch::{approve_class, edit_class, reject_class};
use self::post::create_class;
use crate::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_class))
        .route("/", get(list_classes))
        .route(
            "/{class_id}",
            get(get_class).patch(edit_class).delete(delete_class),
        )
        .route("/approve/{class_id}", patch(approve_class))
        .route("/reject/{class_id}", patch(reject_class))
}
