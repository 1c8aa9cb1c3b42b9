//! Mock identity and step-up providers.
//!
//! Authentication here is a stand-in, not a security mechanism. Both types
//! implement the `portal-auth` provider traits, so a real identity provider
//! replaces them without touching the session controller.
//!
//! | Provider | Accepts |
//! |----------|---------|
//! | [`DirectoryResolver`] | any non-blank password for an email matching a directory pattern |
//! | [`DelayedSecretVerifier`] | any non-blank secret, after a simulated latency |

use crate::config::DirectoryUser;
use async_trait::async_trait;
use portal_auth::{AuthError, IdentityResolver, SecretVerifier};
use portal_types::{Role, UserIdentity};
use std::time::Duration;
use tracing::debug;

/// One directory entry with its role label still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    pattern: String,
    name: String,
    role: String,
}

impl From<&DirectoryUser> for Entry {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            pattern: user.pattern.to_lowercase(),
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

/// Built-in demo directory: `(pattern, name, role)`.
const DEMO_DIRECTORY: &[(&str, &str, &str)] = &[
    ("admin", "Ana Silva", "admin"),
    ("juridico", "Dr. Ricardo Alves", "legal"),
    ("legal", "Dr. Ricardo Alves", "legal"),
    ("gestor", "Carlos Santos", "manager"),
    ("manager", "Carlos Santos", "manager"),
    ("estagiario", "Patricia Costa", "intern"),
    ("intern", "Patricia Costa", "intern"),
    ("colaborador", "Maria Oliveira", "collaborator"),
    ("collaborator", "Maria Oliveira", "collaborator"),
];

/// Resolves logins by email substring against a mock directory.
///
/// The first entry whose pattern occurs in the lower-cased email wins.
/// There is no fallback role: an email matching nothing is
/// [`AuthError::InvalidIdentity`], and an entry with an unknown role label
/// is [`AuthError::InvalidRole`].
///
/// # Example
///
/// ```
/// use portal_auth::IdentityResolver;
/// use portal_runtime::providers::DirectoryResolver;
/// use portal_types::Role;
///
/// let resolver = DirectoryResolver::demo();
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let who = rt
///     .block_on(resolver.resolve_identity("gestor@company.com", "pw"))
///     .unwrap();
/// assert_eq!(who.role(), Role::Manager);
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    entries: Vec<Entry>,
}

impl DirectoryResolver {
    /// The built-in five demo users.
    #[must_use]
    pub fn demo() -> Self {
        let entries = DEMO_DIRECTORY
            .iter()
            .map(|(pattern, name, role)| Entry {
                pattern: (*pattern).to_string(),
                name: (*name).to_string(),
                role: (*role).to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Directory from configuration. Empty means [`demo`](Self::demo).
    #[must_use]
    pub fn from_users(users: &[DirectoryUser]) -> Self {
        if users.is_empty() {
            return Self::demo();
        }
        Self {
            entries: users.iter().map(Entry::from).collect(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for DirectoryResolver {
    async fn resolve_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::InvalidIdentity);
        }

        let lowered = email.to_lowercase();
        let entry = self
            .entries
            .iter()
            .find(|e| !e.pattern.is_empty() && lowered.contains(&e.pattern))
            .ok_or(AuthError::InvalidIdentity)?;

        let role: Role = entry.role.parse()?;
        debug!(pattern = %entry.pattern, role = %role, "directory entry matched");

        Ok(UserIdentity::new(entry.name.clone(), email, role))
    }
}

/// Accepts any non-blank secret after a fixed delay.
///
/// The delay models a network round trip so the controller's single-flight
/// and timeout handling are exercised.
#[derive(Debug, Clone)]
pub struct DelayedSecretVerifier {
    latency: Duration,
}

impl DelayedSecretVerifier {
    /// Creates a verifier with the given latency.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Configured latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl SecretVerifier for DelayedSecretVerifier {
    async fn verify_secret(
        &self,
        identity: &UserIdentity,
        secret: &str,
    ) -> Result<bool, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let accepted = !secret.trim().is_empty();
        debug!(email = %identity.email(), accepted, "mock secret verification");
        Ok(accepted)
    }
}
