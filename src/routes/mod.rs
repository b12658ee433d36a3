//! Thin HTTP handlers over the service layer.
//!
//! Every response uses the JSON envelope `{message, status, data}` on
//! success and `{message, status, details?}` on error, with the HTTP status
//! mirrored in the body's `status` field.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::types::EntityKind;
use crate::services::ServiceError;

pub mod categories;
pub mod images;
pub mod products;

/// Listing query parameters shared by all collection endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    pub size: Option<i64>,
    pub page: Option<usize>,
}

/// Success envelope with the HTTP status mirrored in the body.
pub fn success(message: &str, data: impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": message,
        "status": 200,
        "data": data,
    }))
}

/// Error envelope without details.
pub fn error_message(message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "message": message,
        "status": status.as_u16(),
    }))
}

/// Validation-failure envelope carrying field-level details.
pub fn validation_failed(details: impl Serialize) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "message": "Request validation failed",
        "status": 400,
        "details": {
            "error": "BadRequest",
            "validationErrorMessages": details,
        },
    }))
}

/// 404 envelope for a missing entity.
pub fn item_not_found(kind: EntityKind, id: i32) -> HttpResponse {
    error_message(
        &format!("{kind} {id} not found in the database"),
        StatusCode::NOT_FOUND,
    )
}

/// Uniform rendering of service failures for handlers operating on one
/// entity.
pub fn service_error(err: ServiceError, kind: EntityKind, id: i32) -> HttpResponse {
    match err {
        ServiceError::NotFound => item_not_found(kind, id),
        ServiceError::Validation(message) => error_message(&message, StatusCode::BAD_REQUEST),
        ServiceError::Internal => {
            error_message("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
