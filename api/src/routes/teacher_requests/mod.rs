//! `/api/teacher-requests` route group.
//!
//! - `POST /teacher-requests`: file an application (authenticated, self)
//! - `GET /teacher-requests`: open applications (admin)
//! - `GET /teacher-requests/{email}`: one application (self or admin)
//! - `PATCH /teacher-requests/approve/{request_id}`: accept (admin)
//! - `PATCH /teacher-requests/reject/{request_id}`: reject (admin)
//! - `PATCH /teacher-requests/reapply/{email}`: rejected -> pending (owner)
//!
//! Admin and self-scoped routes share the root path, so role checks live in
//! the handlers.

use axum::{
    Router,
    routing::{get, patch, post},
};

use self::get::{get_request, list_requests};
use self::patch::{approve_request, reapply, reject_request};
use self::post::submit_request;
use crate::state::AppState;

pub mod common;
pub mod get;
pub mod patch;
pub mod post;

pub fn teacher_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_request))
        .route("/", get(list_requests))
        .route("/{email}", get(get_request))
        .route("/approve/{request_id}", patch(approve_request))
        .route("/reject/{request_id}", patch(reject_request))
        .route("/reapply/{email}", patch(reapply))
}
