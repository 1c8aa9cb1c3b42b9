//! Unified error code interface for the portal.
//!
//! Every portal error type implements [`ErrorCode`] so that the frontend
//! can decide how to present a failure without matching on concrete types:
//!
//! - **Machine-readable codes**: stable `UPPER_SNAKE_CASE` strings
//! - **Recoverability**: whether the user can continue (stay on the current
//!   view, retry, open a challenge) or the operation is rejected outright
//!
//! # Example
//!
//! ```
//! use portal_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LoginError {
//!     InvalidIdentity,
//!     InvalidRole,
//! }
//!
//! impl ErrorCode for LoginError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::InvalidIdentity => "LOGIN_INVALID_IDENTITY",
//!             Self::InvalidRole => "LOGIN_INVALID_ROLE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::InvalidIdentity)
//!     }
//! }
//!
//! assert!(LoginError::InvalidIdentity.is_recoverable());
//! assert!(!LoginError::InvalidRole.is_recoverable());
//! ```

/// Unified error code interface for portal errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"AUTH_FORBIDDEN"`
/// - **Prefixed by crate domain**: `AUTH_`, `CONFIG_`, `APP_`
/// - **Stable**: codes are part of the presentation contract
///
/// # Recoverability
///
/// Recoverable errors leave the session usable: the user stays where they
/// are, or is asked for more input. Unrecoverable errors reject the
/// operation that produced them (e.g. session creation with an unknown role).
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the user can continue after this error.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows portal conventions.
///
/// Intended for tests covering every variant of an error enum.
///
/// # Panics
///
/// Panics if the code is empty, lacks the expected prefix, or is not
/// `UPPER_SNAKE_CASE`.
///
/// # Example
///
/// ```
/// use portal_types::{assert_error_code, ErrorCode};
///
/// struct Timeout;
///
/// impl ErrorCode for Timeout {
///     fn code(&self) -> &'static str { "AUTH_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Timeout, "AUTH_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    enum SampleError {
        Retry,
        Fatal,
    }

    impl ErrorCode for SampleError {
        fn code(&self) -> &'static str {
            match self {
                Self::Retry => "SAMPLE_RETRY",
                Self::Fatal => "SAMPLE_FATAL",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Retry)
        }
    }

    #[test]
    fn codes_and_recoverability() {
        assert_eq!(SampleError::Retry.code(), "SAMPLE_RETRY");
        assert!(SampleError::Retry.is_recoverable());
        assert!(!SampleError::Fatal.is_recoverable());
        assert_error_code(&SampleError::Fatal, "SAMPLE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn wrong_prefix_panics() {
        assert_error_code(&SampleError::Retry, "AUTH_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("AUTH_FORBIDDEN"));
        assert!(is_upper_snake_case("ERROR_404"));
        assert!(!is_upper_snake_case("auth_forbidden"));
        assert!(!is_upper_snake_case("_AUTH"));
        assert!(!is_upper_snake_case("AUTH__X"));
        assert!(!is_upper_snake_case("AUTH_"));
    }
}
