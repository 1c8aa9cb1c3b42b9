//! Access-control error taxonomy.
//!
//! ```text
//! login ──────────── InvalidIdentity | InvalidRole
//! navigate ───────── Forbidden | NeedsStepUp
//! submit_secret ──── InvalidSecret | VerificationInFlight | VerificationTimedOut | NoChallenge
//! legal center ───── UnknownDocument | InvalidDocument
//! any operation ──── NotAuthenticated
//! ```
//!
//! Every variant fails closed: no error is ever handled by moving the
//! session to a view the role cannot see.

use portal_types::{ErrorCode, UnknownRole, View};
use thiserror::Error;

/// Unified error for access-control operations.
///
/// # Example
///
/// ```
/// use portal_auth::AuthError;
/// use portal_types::{ErrorCode, View};
///
/// let err = AuthError::Forbidden { view: View::Admin };
/// assert_eq!(err.code(), "AUTH_FORBIDDEN");
/// assert!(err.is_recoverable());
///
/// // Identity failures never reveal whether the account exists
/// assert_eq!(AuthError::InvalidIdentity.to_string(), "invalid email or password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Role label does not name a known role. Session creation is rejected.
    #[error("invalid role: '{0}'")]
    InvalidRole(String),

    /// Credentials could not be resolved to an identity.
    #[error("invalid email or password")]
    InvalidIdentity,

    /// The role may never see the requested view.
    #[error("access to '{view}' is forbidden for this role")]
    Forbidden {
        /// The view that was requested.
        view: View,
    },

    /// The view requires a step-up challenge first.
    #[error("re-authentication required")]
    NeedsStepUp,

    /// Step-up secret was rejected (or blank).
    #[error("incorrect password, try again")]
    InvalidSecret,

    /// A step-up verification is already pending.
    #[error("verification already in progress")]
    VerificationInFlight,

    /// The verification provider did not answer in time.
    #[error("verification timed out")]
    VerificationTimedOut,

    /// No step-up challenge is open.
    #[error("no re-authentication challenge is open")]
    NoChallenge,

    /// No session is active.
    #[error("not logged in")]
    NotAuthenticated,

    /// Document id is not in the store.
    #[error("document not found: {0}")]
    UnknownDocument(u32),

    /// Document upload was rejected before reaching the store.
    #[error("invalid document upload: {0}")]
    InvalidDocument(String),

    /// Identity or verification provider failed.
    #[error("authentication provider error: {0}")]
    Provider(String),
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidRole(_) => "AUTH_INVALID_ROLE",
            Self::InvalidIdentity => "AUTH_INVALID_IDENTITY",
            Self::Forbidden { .. } => "AUTH_FORBIDDEN",
            Self::NeedsStepUp => "AUTH_NEEDS_STEP_UP",
            Self::InvalidSecret => "AUTH_INVALID_SECRET",
            Self::VerificationInFlight => "AUTH_VERIFICATION_IN_FLIGHT",
            Self::VerificationTimedOut => "AUTH_VERIFICATION_TIMED_OUT",
            Self::NoChallenge => "AUTH_NO_CHALLENGE",
            Self::NotAuthenticated => "AUTH_NOT_AUTHENTICATED",
            Self::UnknownDocument(_) => "AUTH_UNKNOWN_DOCUMENT",
            Self::InvalidDocument(_) => "AUTH_INVALID_DOCUMENT",
            Self::Provider(_) => "AUTH_PROVIDER",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidRole(_))
    }
}

impl From<UnknownRole> for AuthError {
    fn from(err: UnknownRole) -> Self {
        Self::InvalidRole(err.0)
    }
}
