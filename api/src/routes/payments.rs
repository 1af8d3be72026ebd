//! `/api/payments` route group: payment records and intent creation.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
};
use common::format_validation_errors;
use db::models::user::Role;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::auth::claims::AuthUser;
use crate::auth::guards::allow_authenticated;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::{require_self_or_admin, stored_role};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
struct CreateIntentRequest {
    /// Whole cents; fractional amounts are rejected at the type level.
    #[validate(range(min = 1, message = "amount must be a positive number of cents"))]
    amount_cents: u64,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    currency: String,
}

#[derive(Debug, Deserialize, Default)]
struct ListPaymentsQuery {
    email: Option<String>,
}

/// POST /api/payments/create-intent
///
/// Delegates to the payment collaborator and returns the opaque client
/// secret. No charge is finalized here.
///
/// ### Errors
/// - 400: validation failure, or the gateway is unreachable/misconfigured
async fn create_intent(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<CreateIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response());
    }

    let client_secret = state
        .payments()
        .create_intent(req.amount_cents, &req.currency)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            json!({ "client_secret": client_secret }),
            "Payment intent created",
        )),
    )
        .into_response())
}

/// GET /api/payments?email=
///
/// Admins see all records (or filter by email); everyone else only their
/// own.
async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller_role = stored_role(&state, &user).await?;

    let scope = match (&query.email, caller_role) {
        (None, Role::Admin) => None,
        (None, _) => Some(user.email().to_string()),
        (Some(email), role) => {
            require_self_or_admin(&user, role, email)?;
            Some(email.clone())
        }
    };

    let payments = state.enrollments().payments(scope.as_deref()).await?;
    Ok(Json(ApiResponse::success(
        json!({ "payments": payments }),
        "Payments retrieved successfully",
    ))
    .into_response())
}

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-intent", post(create_intent))
        .route("/", get(list_payments))
        .route_layer(from_fn(allow_authenticated))
}
