//! HTTP route entry point for `/api/...`.
//!
//! Route groups, one per collection:
//! - `/health`: liveness probe (public)
//! - `/users`: registration (public) and account management (admin)
//! - `/teacher-requests`: teacher application workflow
//! - `/teachers`: the accepted-teacher roster
//! - `/classes`: class lifecycle and catalog
//! - `/enrollments`: the enrollment + seat ledger
//! - `/payments`: payment records and intent creation
//! - `/wishlist`: per-user wishlists
//! - `/assignments`, `/submissions`: assignment and grading workflow
//! - `/feedbacks`: student feedback on assignments

use axum::Router;

use crate::state::AppState;

pub mod assignments;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod feedbacks;
pub mod health;
pub mod payments;
pub mod submissions;
pub mod teacher_requests;
pub mod teachers;
pub mod users;
pub mod wishlist;

/// Builds the complete application router; nested under `/api` in `main`.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/users", users::users_routes())
        .nest(
            "/teacher-requests",
            teacher_requests::teacher_request_routes(),
        )
        .nest("/teachers", teachers::teacher_routes(app_state))
        .nest("/classes", classes::class_routes())
        .nest("/enrollments", enrollments::enrollment_routes())
        .nest("/payments", payments::payment_routes())
        .nest("/wishlist", wishlist::wishlist_routes())
        .nest("/assignments", assignments::assignment_routes())
        .nest("/submissions", submissions::submission_routes())
        .nest("/feedbacks", feedbacks::feedback_routes())
}
