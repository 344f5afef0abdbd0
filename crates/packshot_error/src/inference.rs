//! Inference-service error types and retry classification.

/// Inference-service error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InferenceErrorKind {
    /// API key not found in environment
    MissingApiKey,
    /// Failed to create the HTTP client
    ClientCreation(String),
    /// Request could not be sent or timed out before a status arrived
    Transport(String),
    /// HTTP error with status code and message
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body did not match the expected shape
    MalformedResponse(String),
    /// The service refused the prompt (safety block, empty candidates)
    Blocked(String),
    /// Base64 decoding of an inline payload failed
    Base64Decode(String),
    /// Input type the provider cannot carry
    UnsupportedInput(String),
}

impl std::fmt::Display for InferenceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceErrorKind::MissingApiKey => {
                write!(f, "GEMINI_API_KEY environment variable not set")
            }
            InferenceErrorKind::ClientCreation(msg) => {
                write!(f, "Failed to create inference client: {}", msg)
            }
            InferenceErrorKind::Transport(msg) => write!(f, "Inference request failed: {}", msg),
            InferenceErrorKind::HttpStatus {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            InferenceErrorKind::MalformedResponse(msg) => {
                write!(f, "Malformed inference response: {}", msg)
            }
            InferenceErrorKind::Blocked(reason) => {
                write!(f, "Inference blocked by provider: {}", reason)
            }
            InferenceErrorKind::Base64Decode(msg) => write!(f, "Base64 decode error: {}", msg),
            InferenceErrorKind::UnsupportedInput(msg) => {
                write!(f, "Unsupported input for provider: {}", msg)
            }
        }
    }
}

impl InferenceErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            InferenceErrorKind::HttpStatus { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            InferenceErrorKind::Transport(_) => true,
            _ => false,
        }
    }
}

/// Inference error with source location tracking.
///
/// # Examples
///
/// ```
/// use packshot_error::{InferenceError, InferenceErrorKind};
///
/// let err = InferenceError::new(InferenceErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone)]
pub struct InferenceError {
    /// The kind of error that occurred
    pub kind: InferenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl InferenceError {
    /// Create a new InferenceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InferenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Inference Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for InferenceError {}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use packshot_error::{InferenceError, InferenceErrorKind, RetryableError};
///
/// let err = InferenceError::new(InferenceErrorKind::HttpStatus {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or network timeouts return true.
    /// Permanent errors like 401 or 400 return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for InferenceError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
