//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` used throughout the application.
//! Every service, store and guard operation reports failures through it, and
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! it directly and get a JSON body of the form `{"error": "..."}`.
//!
//! The authentication variants are deliberately coarse. `InvalidCredentials` does not
//! say whether the email or the password was wrong, and `Unauthenticated` does not say
//! whether a token was missing, forged, expired, or belongs to a deleted user.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration attempted with an email that already belongs to a user (HTTP 400).
    DuplicateEmail,
    /// Login failed, for an unknown email or a wrong password alike (HTTP 401).
    InvalidCredentials,
    /// A bearer token failed structural, signature or expiry checks (HTTP 401).
    /// Raised by the credential service; the access guard reports it as `Unauthenticated`.
    InvalidToken,
    /// A protected operation was called without a usable identity (HTTP 401).
    Unauthenticated,
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// Represents an error due to failed input validation (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate and body deserialization failures.
    ValidationError(String),
    /// Invalid or missing startup configuration (HTTP 500).
    Config(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// Represents an unexpected server-side error (HTTP 500), such as a hashing failure.
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email is already in use"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidToken => write!(f, "Invalid token"),
            AppError::Unauthenticated => write!(f, "Unauthorized"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Server-side variants are logged here and answered with a generic message so that
/// database and hashing details never reach the client.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
            AppError::InvalidToken => AppError::Unauthenticated.to_string(),
            AppError::NotFound(msg) | AppError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
/// Unique violations are translated where the constraint is known (see `store::postgres`).
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        assert_eq!(AppError::DuplicateEmail.error_response().status(), 400);
        assert_eq!(AppError::InvalidCredentials.error_response().status(), 401);
        assert_eq!(AppError::InvalidToken.error_response().status(), 401);
        assert_eq!(AppError::Unauthenticated.error_response().status(), 401);
        assert_eq!(
            AppError::NotFound("Task with ID 3 not found".into())
                .error_response()
                .status(),
            404
        );
        assert_eq!(
            AppError::ValidationError("email: invalid".into())
                .error_response()
                .status(),
            422
        );
        assert_eq!(
            AppError::DatabaseError("connection refused".into())
                .error_response()
                .status(),
            500
        );
        assert_eq!(
            AppError::InternalServerError("bcrypt".into())
                .error_response()
                .status(),
            500
        );
    }

    #[actix_rt::test]
    async fn test_server_errors_do_not_leak_details() {
        let response = AppError::DatabaseError("password authentication failed for user".into())
            .error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }

    #[actix_rt::test]
    async fn test_invalid_token_reads_as_unauthorized() {
        let response = AppError::InvalidToken.error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        match AppError::from(sqlx::Error::RowNotFound) {
            AppError::NotFound(_) => {}
            other => panic!("unexpected mapping: {:?}", other),
        }
    }
}
