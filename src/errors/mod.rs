use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

const GENERIC_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug)]
pub enum AppError {
    UnsupportedFileType(String),
    PayloadTooLarge(String),
    BadRequest(String),
    ObjectStoreFailure(String),
    RecordStoreFailure(String),
    Render(String),
    Config(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UnsupportedFileType(msg) => write!(f, "Unsupported File Type: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ObjectStoreFailure(msg) => write!(f, "Object Store Error: {}", msg),
            AppError::RecordStoreFailure(msg) => write!(f, "Record Store Error: {}", msg),
            AppError::Render(msg) => write!(f, "Render Error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ObjectStoreFailure(_)
            | AppError::RecordStoreFailure(_)
            | AppError::Render(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::UnsupportedFileType(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::BadRequest(msg) => {
                log::warn!("Rejected request: {}", self);
                HttpResponse::build(self.status_code()).json(ErrorResponse { error: msg.clone() })
            }
            // Which store failed stays in the log, never in the response.
            _ => {
                log::error!("{}", self);
                HttpResponse::build(self.status_code()).json(ErrorResponse {
                    error: GENERIC_SERVER_ERROR.to_string(),
                })
            }
        }
    }
}
