//! Error rendering for the HTTP layer
//!
//! Domain errors, request validation failures, malformed JSON bodies and
//! unknown routes all leave the server through this module, so clients always
//! receive the `{success: false, error, details?}` envelope.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse,
};
use serde_json::json;
use validator::ValidationErrors;

use bomato_core::errors::{DomainError, ValidationError};
use bomato_shared::config::Environment;
use bomato_shared::types::{ApiResponse, FieldError};

/// Message sent in place of 500-class errors outside development
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message for request bodies that fail field validation
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Runtime environment registered as app data; production when absent
pub fn environment_of(req: &HttpRequest) -> Environment {
    req.app_data::<web::Data<Environment>>()
        .map(|environment| *environment.get_ref())
        .unwrap_or(Environment::Production)
}

/// Build an error envelope with the given status
pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> HttpResponse {
    let mut body = ApiResponse::<()>::error(message);
    if let Some(details) = details {
        body = body.with_details(details);
    }
    HttpResponse::build(status).json(body)
}

/// Render a domain error for the given environment
pub fn domain_error_response(error: &DomainError, environment: Environment) -> HttpResponse {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(error = ?error, "Request failed with internal error");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    if let DomainError::ValidationErr(ValidationError::InvalidField { field, message }) = error {
        return validation_failed(vec![FieldError::new(field.as_str(), message.as_str())]);
    }

    let message = if status.is_server_error() && !environment.is_development() {
        INTERNAL_ERROR_MESSAGE.to_string()
    } else {
        error.to_string()
    };

    let details = environment.is_development().then(|| {
        json!({
            "code": error.error_code(),
            "debug": format!("{:?}", error),
        })
    });

    error_response(status, message, details)
}

/// Render a domain error using the environment registered on the app
pub fn handle_domain_error(req: &HttpRequest, error: &DomainError) -> HttpResponse {
    domain_error_response(error, environment_of(req))
}

/// 400 with a `details` list of `{field, message}` entries
pub fn validation_failed(errors: Vec<FieldError>) -> HttpResponse {
    let details = serde_json::to_value(errors).unwrap_or_default();
    error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED_MESSAGE, Some(details))
}

/// Render `validator` failures, naming fields the way clients send them
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    validation_failed(field_errors(errors))
}

/// Flatten `validator` errors into field errors sorted by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = to_camel_case(&field);
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// `JsonConfig` error handler: malformed or oversized bodies use the envelope
pub fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let environment = environment_of(req);
    let status = match &error {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };

    tracing::debug!(error = %error, path = %req.path(), "Rejected request body");

    let details = environment
        .is_development()
        .then(|| json!({ "debug": error.to_string() }));
    let response = error_response(status, "Invalid request body", details);
    InternalError::from_response(error, response).into()
}

/// Default service for unmatched routes
pub async fn not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Route not found", None)
}
