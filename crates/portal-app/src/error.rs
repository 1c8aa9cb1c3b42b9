//! Application-level error type.
//!
//! [`AppError`] unifies all internal errors for the application layer.

use portal_auth::AuthError;
use portal_runtime::ConfigError;
use portal_types::ErrorCode;
use thiserror::Error;

/// Unified application error.
///
/// Collects all internal errors into a single type for CLI handling.
///
/// # Example
///
/// ```
/// use portal_app::AppError;
/// use portal_auth::AuthError;
/// use portal_types::{ErrorCode, View};
///
/// // Internal error automatically converts to AppError
/// let app_err: AppError = AuthError::Forbidden { view: View::Admin }.into();
///
/// // Codes come from the inner error
/// assert_eq!(app_err.code(), "AUTH_FORBIDDEN");
/// eprintln!("Error: {}", app_err);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Access-control operation failed
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Known command with bad arguments
    #[error("{reason} (in '{input}')")]
    InvalidCommand {
        /// The offending input line.
        input: String,
        /// What was wrong.
        reason: String,
    },

    /// Input is not a command
    #[error("Unknown command: {0}. Type 'help' for commands.")]
    UnknownCommand(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.code(),
            Self::Config(e) => e.code(),
            Self::InvalidCommand { .. } => "APP_INVALID_COMMAND",
            Self::UnknownCommand(_) => "APP_UNKNOWN_COMMAND",
            Self::Io(_) => "APP_IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_recoverable(),
            Self::Config(e) => e.is_recoverable(),
            Self::InvalidCommand { .. } | Self::UnknownCommand(_) => true,
            Self::Io(_) => true,
        }
    }
}
