//! Translation of request validation failures into domain errors.
//!
//! Each mapping yields `invalid_request` with `{field, code}` details so
//! clients can highlight the offending input.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;

use crate::domain::{AuthValidationError, Error, TweetValidationError};

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn auth_validation_error(err: AuthValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

pub(crate) fn tweet_validation_error(err: TweetValidationError) -> Error {
    let message = err.to_string();
    match &err {
        TweetValidationError::InvalidRecipient { value } => Error::invalid_request(message)
            .with_details(json!({
                "field": err.field(),
                "code": err.code(),
                "value": value,
            })),
        _ => field_error(message, err.field(), err.code()),
    }
}

/// Error for a path segment that is not a valid UUID.
pub(crate) fn invalid_path_id(value: &str) -> Error {
    Error::invalid_request("id must be a valid UUID").with_details(json!({
        "field": "id",
        "value": value,
        "code": "invalid_uuid",
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

/// JSON extractor configuration rendering body errors in the shared error
/// schema.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
