use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use std::fmt;

/// Name Postgres gives the UNIQUE constraint on `employees.emp_email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "employees_emp_email_key";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upload(String),
    DuplicateEmail,
    NotFound(String),
    InternalServerError(String),
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl AppError {
    fn code(&self) -> Option<&'static str> {
        match self {
            AppError::Upload(_) => Some("UPLOAD_ERROR"),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => Some("SERVER_ERROR"),
            _ => None,
        }
    }

    /// Message sent to the client. Server-side failures never expose their detail.
    fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::Upload(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::InternalServerError(_) => "Internal server error".to_string(),
            AppError::DatabaseError(_) => "Database error".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Upload(msg) => write!(f, "Upload Error: {}", msg),
            AppError::DuplicateEmail => write!(f, "Conflict: Email already exists"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Upload(_) | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
            code: self.code(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                return AppError::DuplicateEmail;
            }
        }
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
