//! Role (identity category) types.
//!
//! A [`Role`] is assigned once when a session is created and never changes
//! for the lifetime of that session. It is the ceiling of every other
//! permission the session can hold.
//!
//! The set of roles is closed. Role differences are expressed as table
//! lookups in `portal-auth`, never as role-specific code paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed identity category of a portal user.
///
/// # Parsing
///
/// Role labels parse case-insensitively. Both the English names and the
/// labels used by the legacy Portuguese directory are accepted:
///
/// | Role | Accepted labels |
/// |------|-----------------|
/// | `Admin` | `admin` |
/// | `Legal` | `legal`, `juridico`, `jurídico` |
/// | `Manager` | `manager`, `gestor` |
/// | `Collaborator` | `collaborator`, `colaborador` |
/// | `Intern` | `intern`, `estagiario`, `estagiário` |
///
/// Anything else fails with [`UnknownRole`]. There is no fallback role.
///
/// # Example
///
/// ```
/// use portal_types::Role;
///
/// let role: Role = "Gestor".parse().unwrap();
/// assert_eq!(role, Role::Manager);
///
/// assert!("superuser".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Legal department staff.
    #[serde(alias = "juridico")]
    Legal,
    /// Department manager.
    #[serde(alias = "gestor")]
    Manager,
    /// Regular employee.
    #[serde(alias = "colaborador")]
    Collaborator,
    /// Intern with limited metrics.
    #[serde(alias = "estagiario")]
    Intern,
}

impl Role {
    /// Every role, in registry order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Legal,
        Role::Manager,
        Role::Collaborator,
        Role::Intern,
    ];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Legal => "legal",
            Self::Manager => "manager",
            Self::Collaborator => "collaborator",
            Self::Intern => "intern",
        }
    }

    /// Returns the human-readable label shown in headers and badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Legal => "Legal",
            Self::Manager => "Manager",
            Self::Collaborator => "Collaborator",
            Self::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A role label that does not name any known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "legal" | "juridico" | "jurídico" => Ok(Self::Legal),
            "manager" | "gestor" => Ok(Self::Manager),
            "collaborator" | "colaborador" => Ok(Self::Collaborator),
            "intern" | "estagiario" | "estagiário" => Ok(Self::Intern),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
