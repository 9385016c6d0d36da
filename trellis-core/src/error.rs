// Error types for the Trellis controller layer

use thiserror::Error;

/// Generic message sent instead of caller-supplied text for 500 responses.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Structured error raised by handler code to signal a non-200 outcome.
///
/// Carries the intended HTTP status, a message, and whether the response
/// body should be the JSON envelope `{"status": ..., "message": ...}` or
/// the raw message string.
///
/// A status of 500 discards the supplied message: server-side failure
/// detail never reaches the client.
///
/// # Example
///
/// ```
/// use trellis_core::ErrorHandler;
///
/// let err = ErrorHandler::new(403, "You're not allowed here", true);
/// assert_eq!(err.status_code, 403);
///
/// let err = ErrorHandler::new(500, "db password was wrong", false);
/// assert_eq!(err.message, "Internal server error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHandler {
    pub status_code: u16,
    pub message: String,
    pub to_json: bool,
}

impl ErrorHandler {
    pub fn new(status_code: u16, message: impl Into<String>, to_json: bool) -> Self {
        let message = if status_code == 500 {
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            message.into()
        };
        Self {
            status_code,
            message,
            to_json,
        }
    }
}

impl std::fmt::Display for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Declared application error carrying its own status and body format.
    #[error("handler error: {0}")]
    Handler(ErrorHandler),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ErrorHandler> for Error {
    fn from(handler: ErrorHandler) -> Self {
        Error::Handler(handler)
    }
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Handler(h) => h.status_code,
            Error::RouteNotFound(_) => 404,
            Error::Deserialization(_) => 400,

            // Default to 500 for unmapped errors
            _ => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handler_keeps_message() {
        let err = ErrorHandler::new(403, "bad", false);
        assert_eq!(err.status_code, 403);
        assert_eq!(err.message, "bad");
        assert!(!err.to_json);
    }

    #[test]
    fn test_error_handler_sanitizes_500() {
        let err = ErrorHandler::new(500, "secret stack trace", true);
        assert_eq!(err.message, INTERNAL_SERVER_ERROR_MESSAGE);
        assert!(err.to_json);
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            Error::Handler(ErrorHandler::new(418, "teapot", false)).status_code(),
            418
        );
        assert_eq!(Error::RouteNotFound("GET /nope".to_string()).status_code(), 404);
        assert_eq!(Error::Deserialization("bad json".to_string()).status_code(), 400);
        assert_eq!(Error::Internal("oops".to_string()).status_code(), 500);
    }

    #[test]
    fn test_client_server_split() {
        let client = Error::Handler(ErrorHandler::new(403, "no", false));
        assert!(client.is_client_error());
        assert!(!client.is_server_error());

        let server = Error::Internal("oops".to_string());
        assert!(server.is_server_error());
    }
}
