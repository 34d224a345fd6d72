use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskhub_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the API's `{"detail": ...}` error
/// bodies, or per-field dictionaries for validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskhub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Declarative request-DTO validation failures (per-field messages).
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// A single-field validation failure raised imperatively by a handler.
    #[error("Validation failed on field {field}: {message}")]
    Field { field: String, message: String },

    /// The per-identifier request budget is exhausted.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    json!({ "detail": format!("{entity} with id {id} not found") }),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "detail": msg }))
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, json!({ "detail": msg }))
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "detail": msg })),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "detail": "An internal error occurred" }),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "detail": msg })),

            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, field_errors_body(errors))
            }

            AppError::Field { field, message } => {
                let mut body = serde_json::Map::new();
                body.insert(field.to_string(), json!([message]));
                (StatusCode::BAD_REQUEST, serde_json::Value::Object(body))
            }

            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "detail": "Rate limit exceeded. Max 100 requests per minute." }),
            ),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "An internal error occurred" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Render `validator` errors as a `{field: [messages]}` dictionary.
fn field_errors_body(errors: &validator::ValidationErrors) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"))
            })
            .collect();
        body.insert(field.to_string(), json!(messages));
    }
    serde_json::Value::Object(body)
}

/// Classify a sqlx error into an HTTP status and response body.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 400, matching the duplicate-registration contract.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, serde_json::Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            json!({ "detail": "Resource not found" }),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::BAD_REQUEST,
                        json!({ "detail": format!("Duplicate value violates unique constraint: {constraint}") }),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "detail": "An internal error occurred" }),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "detail": "An internal error occurred" }),
            )
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        let message = rejection.body_text();
        if let Some(field) = missing_field(&message) {
            return AppError::Field {
                field: field.to_string(),
                message: "This field is required.".to_string(),
            };
        }
        AppError::BadRequest("Malformed request body".to_string())
    }
}

/// Pull the field name out of serde's "missing field `x`" deserialize error.
fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}

/// Whether a sqlx error is a unique violation on the given constraint.
///
/// Handlers use this to turn specific duplicates (e.g. an already-registered
/// email) into per-field validation errors.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
