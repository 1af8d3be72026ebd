use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::WorkflowError;

/// Standardized JSON envelope for all outgoing responses:
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error envelope with default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Empty `data` payload for error and no-content responses.
#[derive(Serialize, Default)]
pub struct Empty;

/// Bridges workflow errors onto HTTP status codes.
///
/// Store failures are logged here and surfaced as a generic message so
/// internal detail never reaches the client.
pub struct ApiError(pub WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            WorkflowError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required".into())
            }
            WorkflowError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            WorkflowError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            WorkflowError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            WorkflowError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            WorkflowError::Database(e) => {
                tracing::error!(error = %e, "database error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };
        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
