use bytes::Bytes;
use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for uploadcare operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<Bytes>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Transport level failure: DNS, TLS, refused connection, timeout.
    Connection,

    /// The REST API rejected our credentials (HTTP 403).
    Authentication,

    /// The API rejected the request itself (HTTP 400 or 404).
    InvalidRequest,

    /// Any other non-success status, or an unparsable success body.
    Api,

    /// The caller handed us a request we refuse to send, e.g. a path with
    /// a leading slash.
    RequestInvalid,

    /// Configuration error (invalid values)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status and raw body of the response that caused
    /// this error.
    ///
    /// The message is replaced by the body decoded as UTF-8 (lossily).
    pub fn with_response(mut self, status: StatusCode, body: Bytes) -> Self {
        self.message = String::from_utf8_lossy(&body).into_owned();
        self.status = Some(status);
        self.body = Some(body);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, if this error came from one.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Raw response body, preserved verbatim.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Check if this error was returned by the remote API rather than
    /// raised locally.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Authentication | ErrorKind::InvalidRequest | ErrorKind::Api
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Create an API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Connection => write!(f, "connection error"),
            ErrorKind::Authentication => write!(f, "authentication error"),
            ErrorKind::InvalidRequest => write!(f, "invalid request error"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::RequestInvalid => write!(f, "request invalid"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_response_keeps_body_verbatim() {
        let body = Bytes::from_static(b"{\"detail\": \"Incorrect authentication credentials.\"}");
        let err = Error::authentication("").with_response(StatusCode::FORBIDDEN, body.clone());

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.body(), Some(body.as_ref()));
        assert_eq!(
            err.message(),
            "{\"detail\": \"Incorrect authentication credentials.\"}"
        );
        assert!(err.is_api_error());
    }

    #[test]
    fn test_display() {
        let err = Error::connection("connection refused");
        assert_eq!(err.to_string(), "connection error: connection refused");
        assert!(!err.is_api_error());
        assert!(err.body().is_none());
    }
}
