//! HTTP error handling with builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stowage_s3::ErrorSeverity;

use crate::handler::response::ErrorResponse;

/// Tracing target for storage error conversions.
const TRACING_TARGET: &str = "stowage_server::handler::storage";

/// The error type for HTTP handlers in the gateway.
///
/// Pairs an [`ErrorKind`] with optional message, context, and resource
/// information that ends up in the JSON error response.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches context information to the error.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Sets a custom user-friendly message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource if present.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug_struct = f.debug_struct("Error");
        debug_struct.field("kind", &self.kind);

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        if let Some(ref resource) = self.resource {
            debug_struct.field("resource", resource);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }

        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of the HTTP error kinds the gateway produces.
///
/// Each variant corresponds to a specific HTTP status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 404 Not Found - Resource not found
    NotFound,
    /// 502 Bad Gateway - The object store rejected the request or is unreachable
    BadGateway,
    /// 504 Gateway Timeout - The object store did not respond in time
    GatewayTimeout,
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified resource.
    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response template for this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::BadGateway => ErrorResponse::BAD_GATEWAY,
            Self::GatewayTimeout => ErrorResponse::GATEWAY_TIMEOUT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

impl From<stowage_s3::Error> for Error<'static> {
    fn from(error: stowage_s3::Error) -> Self {
        // Log level follows the storage crate's own severity classification;
        // absence and caller mistakes stay out of the error log.
        match error.severity() {
            ErrorSeverity::Critical | ErrorSeverity::High => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Object store operation failed"
                );
            }
            ErrorSeverity::Medium => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Object store operation failed"
                );
            }
            ErrorSeverity::Low => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Object store operation did not complete"
                );
            }
        }

        match error {
            stowage_s3::Error::InvalidArgument(message) => ErrorKind::BadRequest
                .with_message("Invalid request parameter")
                .with_context(message),

            stowage_s3::Error::NotFound(key) => ErrorKind::NotFound
                .with_message("Object not found")
                .with_resource(key),

            stowage_s3::Error::Timeout { timeout } => ErrorKind::GatewayTimeout
                .with_message("Object store did not respond in time")
                .with_context(format!("No response within {timeout:?}")),

            stowage_s3::Error::TransientNetwork(message) => ErrorKind::BadGateway
                .with_message("Object store is unreachable")
                .with_context(message),

            stowage_s3::Error::ServiceError {
                message,
                status_code,
            } => ErrorKind::BadGateway
                .with_message("Object store rejected the request")
                .with_context(format!("{status_code}: {message}")),

            stowage_s3::Error::Config(message) => ErrorKind::InternalServerError
                .with_message("Gateway is misconfigured")
                .with_context(message),

            stowage_s3::Error::Io(err) => ErrorKind::InternalServerError
                .with_message("Transfer failed")
                .with_context(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_kind() {
        let error = Error::new(ErrorKind::NotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Object not found")
            .with_resource("reports/summary.txt")
            .with_context("existence check returned false");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Object not found"));
        assert_eq!(error.resource(), Some("reports/summary.txt"));
        assert_eq!(error.context(), Some("existence check returned false"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Object not found")
            .with_resource("reports/summary.txt");

        let display = format!("{error}");
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("reports/summary.txt"));
    }

    #[test]
    fn status_codes_follow_storage_taxonomy() {
        let cases = [
            (
                stowage_s3::Error::InvalidArgument("ttl".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                stowage_s3::Error::NotFound("a/b.txt".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                stowage_s3::Error::Timeout {
                    timeout: std::time::Duration::from_secs(30),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                stowage_s3::Error::TransientNetwork("connection refused".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                stowage_s3::Error::ServiceError {
                    message: "access denied".into(),
                    status_code: 403,
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                stowage_s3::Error::Config("bucket name cannot be empty".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                stowage_s3::Error::Io(std::io::Error::other("stream reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (storage_error, expected_status) in cases {
            let error = Error::from(storage_error);
            assert_eq!(error.kind().status_code(), expected_status);
        }
    }

    #[test]
    fn not_found_carries_the_key_as_resource() {
        let error = Error::from(stowage_s3::Error::NotFound("test/abc.png".to_string()));
        assert_eq!(error.resource(), Some("test/abc.png"));
    }
}
