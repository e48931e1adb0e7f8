use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for data layer operations.
///
/// Each kind describes one category of failure so callers can branch on the
/// failure class without parsing messages.
///
/// # Examples
///
/// ```rust,ignore
/// use greenpass_data::errors::{DataError, ErrorKind, DataResult};
///
/// fn example() -> DataResult<()> {
///     Err(DataError::new("document not found", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The requested document was not found.
    ///
    /// Raised only where absence is an error (e.g. `update` on a missing key);
    /// point lookups report absence as `Ok(None)` instead.
    NotFound,
    /// Connectivity or availability failure from the datastore backend.
    BackendError,
    /// The backend rejected the operation for authentication or
    /// authorization reasons.
    PermissionDenied,
    /// The operation is not valid in the current context.
    InvalidOperation,
    /// The provided primary key is invalid.
    InvalidId,
    /// Error encoding or decoding stored data.
    EncodingError,
    /// Internal error (usually indicates a bug).
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom error type for the data layer.
///
/// `DataError` carries the error message, its [ErrorKind], an optional cause
/// for error chaining, and a backtrace captured at construction time.
///
/// Backend errors are propagated unchanged through the query adapter and
/// entity facade; this layer performs no retries and no error translation
/// beyond the NotFound conventions documented on each operation.
///
/// # Type alias
///
/// The `DataResult<T>` type alias is equivalent to `Result<T, DataError>` and
/// is used throughout the crate for operations that can fail.
#[derive(Clone)]
pub struct DataError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DataError>>,
    backtrace: Backtrace,
}

impl DataError {
    /// Creates a new `DataError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DataError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `DataError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DataError) -> Self {
        DataError {
            message: message.to_string(),
            error_kind,
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

    pub fn cause(&self) -> Option<&DataError> {
        self.cause.as_deref()
    }

    /// Checks whether this error is a NotFound-class error.
    pub fn is_not_found(&self) -> bool {
        self.error_kind == ErrorKind::NotFound
    }
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for data layer operations.
///
/// `DataResult<T>` is shorthand for `Result<T, DataError>`. All fallible
/// operations in this crate return this type.
pub type DataResult<T> = Result<T, DataError>;

impl From<String> for DataError {
    fn from(msg: String) -> Self {
        DataError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DataError {
    fn from(msg: &str) -> Self {
        DataError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_new_creates_error() {
        let error = DataError::new("an error occurred", ErrorKind::BackendError);
        assert_eq!(error.message(), "an error occurred");
        assert_eq!(error.kind(), &ErrorKind::BackendError);
        assert!(error.cause().is_none());
    }

    #[test]
    fn data_error_with_cause_chains() {
        let cause = DataError::new("connection refused", ErrorKind::BackendError);
        let error =
            DataError::new_with_cause("query failed", ErrorKind::BackendError, cause);
        assert!(error.cause().is_some());
        assert_eq!(
            error.cause().unwrap().message(),
            "connection refused"
        );
    }

    #[test]
    fn data_error_source_returns_cause() {
        let cause = DataError::new("inner", ErrorKind::InternalError);
        let error = DataError::new_with_cause("outer", ErrorKind::BackendError, cause);
        assert!(error.source().is_some());

        let error = DataError::new("no cause", ErrorKind::BackendError);
        assert!(error.source().is_none());
    }

    #[test]
    fn data_error_display_formats_message_only() {
        let error = DataError::new("an error occurred", ErrorKind::NotFound);
        assert_eq!(format!("{}", error), "an error occurred");
    }

    #[test]
    fn data_error_debug_includes_cause() {
        let cause = DataError::new("inner", ErrorKind::InternalError);
        let error = DataError::new_with_cause("outer", ErrorKind::BackendError, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("outer"));
        assert!(formatted.contains("Caused by:"));
    }

    #[test]
    fn is_not_found_matches_kind() {
        assert!(DataError::new("missing", ErrorKind::NotFound).is_not_found());
        assert!(!DataError::new("down", ErrorKind::BackendError).is_not_found());
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::NotFound), "Not found");
        assert_eq!(format!("{}", ErrorKind::BackendError), "Backend error");
        assert_eq!(format!("{}", ErrorKind::PermissionDenied), "Permission denied");
    }

    #[test]
    fn from_str_uses_internal_error() {
        let error: DataError = "boom".into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        assert_eq!(error.message(), "boom");

        let error: DataError = String::from("boom").into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
    }
}
