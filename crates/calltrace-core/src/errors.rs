use thiserror::Error;

/// Result type alias using CallTraceError
pub type Result<T> = std::result::Result<T, CallTraceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every construction-time failure in calltrace maps to one kind, and each
/// kind maps to a stable error code usable by callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A log template does not contain exactly one `%s` placeholder
    InvalidTemplate,
    /// A template registry could not be parsed
    InvalidRegistry,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidTemplate => "ERR_INVALID_TEMPLATE",
            ErrorKind::InvalidRegistry => "ERR_INVALID_REGISTRY",
        }
    }
}

// ========== End Error Facility ==========

/// Errors raised while building wrappers
///
/// Wrapped calls never surface these: failures of the wrapped function are
/// reported through the logging sink, not through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallTraceError {
    /// Template rejected at construction
    #[error("Invalid log template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// Registry source text could not be decoded
    #[error("Invalid template registry: {reason}")]
    InvalidRegistry { reason: String },
}

impl CallTraceError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallTraceError::InvalidTemplate { .. } => ErrorKind::InvalidTemplate,
            CallTraceError::InvalidRegistry { .. } => ErrorKind::InvalidRegistry,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
