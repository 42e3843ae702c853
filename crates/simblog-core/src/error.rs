//! Error types and exit codes for simblog
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including storage outages)
//! - 2: Usage error (bad flags/args, invalid input)
//! - 3: Data error (document not found, duplicate path)

mod macros;

use thiserror::Error;

/// Exit codes for the simblog CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing or duplicate document (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can cross the core's boundary
#[derive(Error, Debug)]
pub enum SimblogError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("document not found: {path}")]
    DocumentNotFound { path: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("storage unavailable during {operation}: {reason}")]
    StorageUnavailable { operation: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl SimblogError {
    /// Create an error for a failed storage operation
    pub fn storage(operation: &str, error: impl std::fmt::Display) -> Self {
        SimblogError::StorageUnavailable {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a document that does not exist
    pub fn not_found(path: impl Into<String>) -> Self {
        SimblogError::DocumentNotFound { path: path.into() }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        SimblogError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        SimblogError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the caller may retry the operation later
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimblogError::StorageUnavailable { .. })
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SimblogError::UnknownFormat(_)
            | SimblogError::UsageError(_)
            | SimblogError::InvalidValue { .. } => ExitCode::Usage,

            SimblogError::DocumentNotFound { .. } | SimblogError::AlreadyExists { .. } => {
                ExitCode::Data
            }

            SimblogError::StorageUnavailable { .. }
            | SimblogError::Io(_)
            | SimblogError::Json(_)
            | SimblogError::Toml(_)
            | SimblogError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SimblogError::UnknownFormat(_) => "unknown_format",
            SimblogError::UsageError(_) => "usage_error",
            SimblogError::InvalidValue { .. } => "invalid_value",
            SimblogError::DocumentNotFound { .. } => "not_found",
            SimblogError::AlreadyExists { .. } => "already_exists",
            SimblogError::StorageUnavailable { .. } => "storage_unavailable",
            SimblogError::Io(_) => "io_error",
            SimblogError::Json(_) => "json_error",
            SimblogError::Toml(_) => "toml_error",
            SimblogError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
                "retryable": self.is_retryable(),
            }
        })
    }
}

/// Result type alias for simblog operations
pub type Result<T> = std::result::Result<T, SimblogError>;
