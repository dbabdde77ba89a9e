use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: sea_orm::DbErr,
        context: Option<String>,
    },

    #[error("Validation error in {field}: {message}")]
    Validation {
        message: String,
        field: String,
        value: Option<String>,
    },

    #[error("Resource {resource} with id {id} not found")]
    NotFound { resource: String, id: String },

    #[error("User {user_id} could not be verified: {reason}")]
    UserNotFound { user_id: i32, reason: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: "An unexpected database error occurred".to_string(),
            source: err,
            context: None,
        }
    }
}

impl AppError {
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Database {
                message, source, ..
            } => Self::Database {
                message,
                source,
                context: Some(context.into()),
            },
            error => error,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.into(),
            value: None,
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, details) = match &self {
            Self::Validation {
                message,
                field,
                value,
            } => {
                let mut details = json!({ "field": field });
                if let Some(value) = value {
                    details["invalidValue"] = json!(value);
                }
                ("VALIDATION_ERROR", message.clone(), details)
            }
            Self::NotFound { resource, id } => (
                "NOT_FOUND",
                format!("{} with ID {} not found", resource, id),
                json!({ "resource": resource, "id": id }),
            ),
            Self::UserNotFound { user_id, reason } => (
                "USER_NOT_FOUND",
                reason.clone(),
                json!({ "field": "userId", "userId": user_id }),
            ),
            Self::Database {
                message,
                source,
                context,
            } => {
                tracing::error!(error = %source, context = ?context, "database error");
                ("DATABASE_ERROR", message.clone(), json!({}))
            }
            Self::Internal(message) => {
                tracing::error!("internal error: {}", message);
                (
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
        };

        (
            self.status_code(),
            Json(json!({
                "error": {
                    "code": code,
                    "message": message,
                    "details": details,
                }
            })),
        )
            .into_response()
    }
}
