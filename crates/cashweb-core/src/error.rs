//! Error types for cashweb-core
//!
//! Remote failures keep the transport's classification (network, timeout,
//! service-reported) so the view can tell the user what went wrong.
//! Unparsable amounts are not errors; see `balances::ParseWarning`.

use cashweb_remote::TransportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The service could not be reached
    NetworkError,
    /// The service did not answer in time
    Timeout,
    /// The service reported a failure
    RemoteError,
    /// The service answered something unreadable
    InvalidResponse,
    /// Submitted data could not be marshalled
    ValidationError,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::RemoteError => write!(f, "REMOTE_ERROR"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - the request failed but retrying may help
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - the application cannot work as configured
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for cashweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Service de comptabilité injoignable : {message}")]
    NetworkError { message: String },

    #[error("Le service de comptabilité n'a pas répondu en {millis} ms")]
    Timeout { millis: u64 },

    #[error("{message}")]
    RemoteError { message: String },

    #[error("Réponse illisible du service de comptabilité : {message}")]
    InvalidResponse { message: String },

    #[error("Données invalides : {message}")]
    ValidationError { message: String },

    #[error("Configuration invalide : {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NetworkError { .. } => ErrorCode::NetworkError,
            CoreError::Timeout { .. } => ErrorCode::Timeout,
            CoreError::RemoteError { .. } => ErrorCode::RemoteError,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NetworkError { .. } => ErrorSeverity::Warning,
            CoreError::Timeout { .. } => ErrorSeverity::Warning,
            CoreError::RemoteError { .. } => ErrorSeverity::Error,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NetworkError { .. } => {
                details = details.with_suggestion(
                    "Vérifiez la connexion internet du serveur.".to_string(),
                );
                details = details.with_suggestion(
                    "Vérifiez que remote.base_url désigne l'application web déployée.".to_string(),
                );
            }
            CoreError::Timeout { millis } => {
                details = details.with_detail(serde_json::json!({ "timeout_ms": millis }));
                details = details.with_suggestion(
                    "Le tableur est peut-être occupé, réessayez dans un instant.".to_string(),
                );
            }
            CoreError::RemoteError { message } => {
                details = details.with_detail(serde_json::json!({ "remote_message": message }));
            }
            CoreError::InvalidResponse { .. } => {
                details = details.with_suggestion(
                    "Vérifiez que l'application web est déployée avec un accès pour tous.".to_string(),
                );
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
            }
            CoreError::ConfigError { .. } => {
                details = details.with_suggestion(
                    "Consultez la configuration par défaut pour les valeurs acceptées.".to_string(),
                );
            }
        }

        details
    }
}

impl From<TransportError> for CoreError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Network { message } => CoreError::NetworkError { message },
            TransportError::Timeout { millis } => CoreError::Timeout { millis },
            TransportError::Remote { message } => CoreError::RemoteError { message },
            TransportError::InvalidResponse { message } => CoreError::InvalidResponse { message },
            TransportError::InvalidUrl { url } => CoreError::ConfigError {
                message: format!("remote.base_url invalide : {}", url),
            },
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
        }
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "cashweb::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            _ => log::error!(
                target: "cashweb::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "cashweb::error",
            "WARNING: {} - Operation: {}",
            message,
            context.operation
        );
    }
}

// ==================== Tests ====================
