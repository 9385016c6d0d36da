//! Translation of handler outcomes into HTTP responses
//!
//! Two states only. Success: the handler's value is rendered as the body of
//! a 200 response. Failure: an `ErrorHandler` chooses its own status and
//! body format; anything else becomes an opaque 500 with no body detail.

use crate::{Error, HttpResponse, Json, INTERNAL_SERVER_ERROR_MESSAGE};
use serde::Serialize;

/// Conversion of handler return values into success responses.
///
/// Implemented for the shapes annotated handlers return directly: strings,
/// raw bytes, unit, `Json<T>`, and a prebuilt `HttpResponse` passed through
/// untouched.
pub trait IntoResponseBody {
    fn into_response(self) -> Result<HttpResponse, Error>;
}

impl IntoResponseBody for HttpResponse {
    fn into_response(self) -> Result<HttpResponse, Error> {
        Ok(self)
    }
}

impl IntoResponseBody for String {
    fn into_response(self) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::ok().with_body(self.into_bytes()))
    }
}

impl IntoResponseBody for &str {
    fn into_response(self) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::ok().with_body(self.as_bytes().to_vec()))
    }
}

impl IntoResponseBody for Vec<u8> {
    fn into_response(self) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::ok().with_body(self))
    }
}

impl IntoResponseBody for () {
    fn into_response(self) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::ok())
    }
}

impl<T: Serialize> IntoResponseBody for Json<T> {
    fn into_response(self) -> Result<HttpResponse, Error> {
        HttpResponse::ok().with_json(&self.0)
    }
}

/// Reduce a handler result to the response that is sent on the wire.
///
/// Used by the bridged handlers generated by `#[routes]`; handler failures
/// never propagate past this point.
pub fn respond<T: IntoResponseBody>(result: Result<T, Error>) -> HttpResponse {
    match result {
        Ok(value) => match value.into_response() {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "failed to render handler response");
                HttpResponse::internal_server_error()
            }
        },
        Err(error) => error_response(&error),
    }
}

/// Map a handler failure to a response.
///
/// A declared `ErrorHandler` picks its own status; `to_json` selects the
/// `{"status", "message"}` envelope over the raw message string. A status
/// of 500 always sends the generic message, even for descriptors built as
/// struct literals that never went through `ErrorHandler::new`.
/// Undeclared failures yield a bare 500 with an empty body.
pub fn error_response(error: &Error) -> HttpResponse {
    match error {
        Error::Handler(h) => {
            let message = if h.status_code == 500 {
                INTERNAL_SERVER_ERROR_MESSAGE
            } else {
                h.message.as_str()
            };
            if h.to_json {
                let body = serde_json::json!({
                    "status": h.status_code,
                    "message": message,
                });
                HttpResponse::new(h.status_code)
                    .with_json(&body)
                    .unwrap_or_else(|_| HttpResponse::internal_server_error())
            } else {
                HttpResponse::new(h.status_code).with_body(message.as_bytes().to_vec())
            }
        }
        other => {
            tracing::error!(error = %other, "handler failed with undeclared error");
            HttpResponse::internal_server_error()
        }
    }
}
