use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Request token rejected")]
    TokenRejected,

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Render a minimal standalone error page. Most errors never reach this
/// boundary: the admin handlers convert validation and token failures into
/// form redisplays, and the embed renderer swallows lookup failures into a
/// placeholder paragraph.
fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<!doctype html><html><body><div class=\"notice notice-error\"><p>{}</p></div></body></html>",
        message
    );
    (status, Html(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while accessing the datastore.",
                )
            }
            AppError::NotFound(ref msg) => error_page(StatusCode::NOT_FOUND, msg),
            AppError::Validation(ref errors) => {
                error_page(StatusCode::BAD_REQUEST, &errors.join(" "))
            }
            AppError::TokenRejected => error_page(
                StatusCode::BAD_REQUEST,
                "The request could not be verified. Please try again.",
            ),
            AppError::Template(ref msg) => {
                tracing::error!("Template error: {}", msg);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
