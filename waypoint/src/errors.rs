use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for Waypoint operations
///
/// This enum represents all possible error types that can occur during
/// Waypoint operations. Each error kind describes a specific category of
/// failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use waypoint::errors::{WaypointError, ErrorKind, WaypointResult};
///
/// fn example() -> WaypointResult<()> {
///     Err(WaypointError::new("Index entry not found", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Failure of the underlying key-value store during an index read or write
    ResourceError,
    /// Malformed metadata JSON or a payload that failed to serialize
    EncodingError,
    /// An index entry exists without its expected metadata sidecar
    MissingMetadata,
    /// The requested resource was not found
    NotFound,
    /// A collection path or field name failed validation
    ValidationError,
    /// The operation is declared but intentionally not supported
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ResourceError => write!(f, "Resource error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::MissingMetadata => write!(f, "Missing metadata"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Waypoint error type.
///
/// `WaypointError` encapsulates error information including the error message,
/// kind, an optional HTTP-like status code, and an optional cause. It supports
/// error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use waypoint::errors::{WaypointError, ErrorKind};
///
/// // Create a simple error
/// let err = WaypointError::new("Collection path is empty", ErrorKind::ValidationError);
///
/// // Create an error with a status-like code
/// let err = WaypointError::new_with_status("Index write failed", ErrorKind::ResourceError, 500);
/// ```
///
/// # Type alias
///
/// The `WaypointResult<T>` type alias is equivalent to `Result<T, WaypointError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct WaypointError {
    message: String,
    error_kind: ErrorKind,
    status: Option<u16>,
    cause: Option<Box<WaypointError>>,
    backtrace: Backtrace,
}

impl WaypointError {
    /// Creates a new `WaypointError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        WaypointError {
            message: message.to_string(),
            error_kind,
            status: None,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `WaypointError` carrying an HTTP-like status code.
    ///
    /// The status code is advisory; callers translating a `WaypointError` into
    /// their own domain response (e.g. an HTTP error) may use it directly.
    pub fn new_with_status(message: &str, error_kind: ErrorKind, status: u16) -> Self {
        WaypointError {
            message: message.to_string(),
            error_kind,
            status: Some(status),
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `WaypointError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: WaypointError) -> Self {
        WaypointError {
            message: message.to_string(),
            error_kind,
            status: None,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn cause(&self) -> Option<&WaypointError> {
        self.cause.as_deref()
    }
}

impl Display for WaypointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for WaypointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for WaypointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Waypoint operations.
///
/// `WaypointResult<T>` is shorthand for `Result<T, WaypointError>`.
/// All fallible Waypoint operations return this type.
pub type WaypointResult<T> = Result<T, WaypointError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for WaypointError {
    fn from(err: std::io::Error) -> Self {
        WaypointError::new(&format!("IO error: {}", err), ErrorKind::ResourceError)
    }
}

impl From<serde_json::Error> for WaypointError {
    fn from(err: serde_json::Error) -> Self {
        WaypointError::new(
            &format!("JSON serialization error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<std::string::FromUtf8Error> for WaypointError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WaypointError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<String> for WaypointError {
    fn from(msg: String) -> Self {
        WaypointError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for WaypointError {
    fn from(msg: &str) -> Self {
        WaypointError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_error_new_creates_error() {
        let error = WaypointError::new("An error occurred", ErrorKind::ResourceError);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::ResourceError);
        assert!(error.status.is_none());
        assert!(error.cause.is_none());
    }

    #[test]
    fn waypoint_error_new_with_status_carries_code() {
        let error = WaypointError::new_with_status("Index write failed", ErrorKind::ResourceError, 500);
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.kind(), &ErrorKind::ResourceError);
    }

    #[test]
    fn waypoint_error_new_with_cause_creates_error() {
        let cause = WaypointError::new("put rejected", ErrorKind::ResourceError);
        let error = WaypointError::new_with_cause("An error occurred", ErrorKind::ResourceError, cause);
        assert_eq!(error.message(), "An error occurred");
        assert!(error.cause().is_some());
    }

    #[test]
    fn waypoint_error_display_formats_correctly() {
        let error = WaypointError::new("An error occurred", ErrorKind::NotFound);
        assert_eq!(format!("{}", error), "An error occurred");
    }

    #[test]
    fn waypoint_error_debug_formats_with_cause() {
        let cause = WaypointError::new("put rejected", ErrorKind::ResourceError);
        let error = WaypointError::new_with_cause("An error occurred", ErrorKind::ResourceError, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("An error occurred"));
        assert!(formatted.contains("Caused by:"));
    }

    #[test]
    fn waypoint_error_source_returns_cause() {
        let cause = WaypointError::new("put rejected", ErrorKind::ResourceError);
        let error = WaypointError::new_with_cause("An error occurred", ErrorKind::ResourceError, cause);
        assert!(error.source().is_some());

        let error = WaypointError::new("An error occurred", ErrorKind::ResourceError);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::ResourceError), "Resource error");
        assert_eq!(format!("{}", ErrorKind::MissingMetadata), "Missing metadata");
        assert_eq!(format!("{}", ErrorKind::InvalidOperation), "Invalid operation");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::other("connection reset");
        let err: WaypointError = io_err.into();
        assert_eq!(err.kind(), &ErrorKind::ResourceError);
        assert!(err.message().contains("IO error"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: WaypointError = json_err.into();
        assert_eq!(err.kind(), &ErrorKind::EncodingError);
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xFF, 0xFE]).unwrap_err();
        let err: WaypointError = utf8_err.into();
        assert_eq!(err.kind(), &ErrorKind::EncodingError);
        assert!(err.message().contains("UTF-8"));
    }

    #[test]
    fn test_from_str_and_string() {
        let err: WaypointError = "string error".into();
        assert_eq!(err.kind(), &ErrorKind::InternalError);
        assert_eq!(err.message(), "string error");

        let err: WaypointError = String::from("owned error").into();
        assert_eq!(err.message(), "owned error");
    }

    #[test]
    fn test_question_mark_operator_with_from() {
        fn parse_entry() -> WaypointResult<serde_json::Value> {
            let value: serde_json::Value = serde_json::from_str("{\"status\": \"active\"}")?;
            Ok(value)
        }

        let result = parse_entry();
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_chain_with_different_kinds() {
        let root_cause = WaypointError::new("put rejected", ErrorKind::ResourceError);
        let top_level = WaypointError::new_with_cause(
            "Cannot create indexes",
            ErrorKind::MissingMetadata,
            root_cause,
        );

        assert_eq!(top_level.kind(), &ErrorKind::MissingMetadata);
        if let Some(cause) = top_level.cause() {
            assert_eq!(cause.kind(), &ErrorKind::ResourceError);
        }
    }
}
