//! Pluggable authentication providers.
//!
//! Login and step-up both talk to an identity provider through these
//! traits. The runtime ships mock implementations (`DirectoryResolver`,
//! `DelayedSecretVerifier`); a real provider implements the same traits and
//! is injected into the session controller without touching the step-up
//! state machine.
//!
//! # Architecture
//!
//! ```text
//! IdentityResolver / SecretVerifier (portal-auth)   <- abstract
//!          │
//!          ├── DirectoryResolver, DelayedSecretVerifier (portal-runtime) <- mock
//!          │
//!          └── (future) OIDC, LDAP, ...
//! ```

use crate::AuthError;
use async_trait::async_trait;
use portal_types::UserIdentity;

/// Resolves login credentials to an identity.
///
/// # Contract
///
/// - Unknown accounts and wrong passwords both fail with
///   [`AuthError::InvalidIdentity`]. Implementations must not reveal which.
/// - An account whose role label does not parse fails with
///   [`AuthError::InvalidRole`]. No fallback role is assumed.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use portal_auth::{AuthError, IdentityResolver, Role, UserIdentity};
///
/// struct SingleUser;
///
/// #[async_trait]
/// impl IdentityResolver for SingleUser {
///     async fn resolve_identity(
///         &self,
///         email: &str,
///         password: &str,
///     ) -> Result<UserIdentity, AuthError> {
///         if email == "ana@company.com" && password == "s3cret" {
///             Ok(UserIdentity::new("Ana", email, Role::Admin))
///         } else {
///             Err(AuthError::InvalidIdentity)
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves `(email, password)` to a name and role.
    async fn resolve_identity(&self, email: &str, password: &str)
        -> Result<UserIdentity, AuthError>;
}

/// Verifies a step-up secret against the current identity.
///
/// Returns `Ok(true)` to accept, `Ok(false)` to reject. `Err` is reserved
/// for provider failures; the challenge stays open either way.
///
/// Blank secrets never reach a verifier: the state machine rejects them
/// first.
#[async_trait]
pub trait SecretVerifier: Send + Sync {
    /// Checks `secret` for `identity`.
    async fn verify_secret(&self, identity: &UserIdentity, secret: &str)
        -> Result<bool, AuthError>;
}
