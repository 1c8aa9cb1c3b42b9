//! Resolved user identity.

use crate::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is acting: display name, email and role.
///
/// An identity is the output of identity resolution and the input of
/// session creation. It carries no privilege state; the legal-access flag
/// and step-up state belong to the session, not the identity.
///
/// # Example
///
/// ```
/// use portal_types::{Role, UserIdentity};
///
/// let who = UserIdentity::new("Ana Silva", "admin@company.com", Role::Admin);
/// assert_eq!(who.role(), Role::Admin);
/// assert_eq!(who.to_string(), "Ana Silva <admin@company.com> (Admin)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    name: String,
    email: String,
    role: Role,
}

impl UserIdentity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address used to log in.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Assigned role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.role)
    }
}
