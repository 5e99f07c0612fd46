//! Domain errors rendered as JSON HTTP responses.
//!
//! The body is the serialised [`Error`] itself. Internal failures are logged
//! in full and sent with a generic message; store outages are logged at
//! `warn` because the client is expected to retry the request.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Handler result carrying a domain error.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload safe to show the client.
fn public_payload(err: &Error) -> Cow<'_, Error> {
    if err.code() != ErrorCode::InternalError {
        return Cow::Borrowed(err);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match err.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(message = self.message(), trace_id = ?self.trace_id(), "data store unavailable");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_payload(self))
    }
}

#[cfg(test)]
mod tests;
