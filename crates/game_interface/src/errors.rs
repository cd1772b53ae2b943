use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::players::validation::ValidationError;

#[derive(Debug, PartialEq)]
pub enum AppError {
    ValidationError { reason: ValidationError },
    NotFound { msg: String },
    MongoError { msg: String },
    BsonError { msg: String },
    StoreError { msg: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError { reason } => write!(f, "Validation Error: '{}'", reason),
            AppError::NotFound { msg } => write!(f, "Not Found: '{}'", msg),
            AppError::MongoError { msg } => write!(f, "MongoDB Error: '{}'", msg),
            AppError::BsonError { msg } => write!(f, "Bson Serialization Error: '{}'", msg),
            AppError::StoreError { msg } => write!(f, "Store Error: '{}'", msg),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(reason: ValidationError) -> Self {
        AppError::ValidationError { reason }
    }
}

// A body that cannot be decoded into the expected members is a bad request,
// like any other invalid member.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        AppError::ValidationError {
            reason: ValidationError::MalformedBody,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MongoError { .. } | AppError::BsonError { .. } | AppError::StoreError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.to_string();

        (status, body).into_response()
    }
}
