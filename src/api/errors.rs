use crate::db::RepositoryError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().finish()).into()
}

pub(crate) fn error_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::ValidationError(_) => StatusCode::BAD_REQUEST,
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Forbidden(_) => StatusCode::FORBIDDEN,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::DatabaseError(_)
        | RepositoryError::ConnectionPoolError(_)
        | RepositoryError::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message: stable text for the client error classes,
/// generic text for server faults (detail stays in the server log).
pub(crate) fn client_message(e: &RepositoryError) -> String {
    match e {
        RepositoryError::ValidationError(_)
        | RepositoryError::NotFound(_)
        | RepositoryError::Forbidden(_)
        | RepositoryError::Conflict(_) => e.to_string(),
        _ => "internal server error".to_string(),
    }
}
