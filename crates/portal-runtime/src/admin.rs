//! Administration panel content.
//!
//! The panel shows three things to roles with
//! [`can_view_admin_panel`](portal_auth::RoleCapabilities::can_view_admin_panel):
//!
//! - the user directory ([`UserRecord`], searchable by name or email)
//! - the permission matrix ([`RoleSummary`], projected from the role registry)
//! - the system activity log ([`SystemEvent`], filterable by [`EventKind`])
//!
//! The gate lives in the session controller; directories do no access
//! control of their own.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use portal_auth::{capabilities, AuthError, DepartmentScope, RoleCapabilities};
use portal_types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether a directory account may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Can log in.
    Active,
    /// Disabled.
    Inactive,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        })
    }
}

/// One account in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Directory id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Account status.
    pub status: AccountStatus,
    /// Last access, as reported by the directory.
    pub last_access: String,
}

impl UserRecord {
    /// Case-insensitive substring match on name or email. Blank matches all.
    #[must_use]
    pub fn matches(&self, search: &str) -> bool {
        let term = search.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
    }
}

/// One row of the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    /// The role.
    pub role: Role,
    /// Registry row the matrix columns are read from.
    pub capabilities: RoleCapabilities,
    /// One-line description for administrators.
    pub description: &'static str,
}

impl RoleSummary {
    /// Matrix row for `role`.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        Self {
            role,
            capabilities: capabilities(role),
            description: describe(role),
        }
    }
}

/// The permission matrix, one row per role in [`Role::ALL`] order.
#[must_use]
pub fn role_matrix() -> Vec<RoleSummary> {
    Role::ALL.into_iter().map(RoleSummary::for_role).collect()
}

const fn describe(role: Role) -> &'static str {
    match role {
        Role::Admin => "Full access, including user administration and the legal center",
        Role::Legal => "Legal center only, after identity confirmation",
        Role::Manager => "Every department, including financial data",
        Role::Collaborator => "Subscribed departments, no financial data",
        Role::Intern => "Subscribed departments, headline numbers only",
    }
}

/// Short label for a department scope, as shown in the matrix.
#[must_use]
pub const fn scope_label(scope: DepartmentScope) -> &'static str {
    match scope {
        DepartmentScope::All => "all",
        DepartmentScope::Subscribed => "subscribed",
        DepartmentScope::None => "none",
    }
}

/// Kind of system activity, used to filter the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A page or data set was opened.
    Access,
    /// Data left the portal.
    Export,
    /// Settings or data were changed.
    Modify,
}

impl EventKind {
    /// All kinds, in display order.
    pub const ALL: [EventKind; 3] = [Self::Access, Self::Export, Self::Modify];

    /// Lowercase id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Export => "export",
            Self::Modify => "modify",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized event kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log filter '{0}' (expected access, export or modify)")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// One entry of the system activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    /// Display name of the acting user.
    pub user: String,
    /// What was done.
    pub action: String,
    /// Filter kind.
    pub kind: EventKind,
    /// When it happened (portal local time).
    pub at: NaiveDateTime,
    /// Client address.
    pub ip: String,
}

/// Source of the user directory and activity log shown in the admin panel.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Accounts matching `search` (name or email), in directory order.
    async fn users(&self, search: Option<&str>) -> Result<Vec<UserRecord>, AuthError>;

    /// Activity log entries of `kind` (all when `None`), newest first.
    async fn system_events(&self, kind: Option<EventKind>)
        -> Result<Vec<SystemEvent>, AuthError>;
}

/// Fixed in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdminDirectory {
    users: Vec<UserRecord>,
    events: Vec<SystemEvent>,
}

impl InMemoryAdminDirectory {
    /// Directory over the given accounts and events.
    #[must_use]
    pub fn new(users: Vec<UserRecord>, events: Vec<SystemEvent>) -> Self {
        Self { users, events }
    }

    /// Directory with the demo accounts and activity.
    #[must_use]
    pub fn seeded() -> Self {
        let users = USER_SEED
            .iter()
            .zip(1..)
            .map(|(&(name, email, role, status, last_access), id)| UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role,
                status,
                last_access: last_access.to_string(),
            })
            .collect();

        let events = EVENT_SEED
            .iter()
            .map(|&(user, action, kind, (y, mo, d), (h, mi, s), ip)| SystemEvent {
                user: user.to_string(),
                action: action.to_string(),
                kind,
                at: NaiveDate::from_ymd_opt(y, mo, d)
                    .and_then(|date| date.and_hms_opt(h, mi, s))
                    .unwrap_or_default(),
                ip: ip.to_string(),
            })
            .collect();

        Self { users, events }
    }
}

#[async_trait]
impl AdminDirectory for InMemoryAdminDirectory {
    async fn users(&self, search: Option<&str>) -> Result<Vec<UserRecord>, AuthError> {
        Ok(self
            .users
            .iter()
            .filter(|u| search.map_or(true, |term| u.matches(term)))
            .cloned()
            .collect())
    }

    async fn system_events(
        &self,
        kind: Option<EventKind>,
    ) -> Result<Vec<SystemEvent>, AuthError> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|e| kind.map_or(true, |k| e.kind == k))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(events)
    }
}

type UserSeed = (&'static str, &'static str, Role, AccountStatus, &'static str);

const USER_SEED: &[UserSeed] = &[
    ("Ana Silva", "ana.silva@company.com", Role::Admin, AccountStatus::Active, "Today, 14:32"),
    (
        "Dr. Ricardo Alves",
        "ricardo.alves@company.com",
        Role::Legal,
        AccountStatus::Active,
        "Today, 13:20",
    ),
    (
        "Carlos Santos",
        "carlos.santos@company.com",
        Role::Manager,
        AccountStatus::Active,
        "Today, 12:15",
    ),
    (
        "Maria Oliveira",
        "maria.oliveira@company.com",
        Role::Collaborator,
        AccountStatus::Active,
        "Yesterday, 18:45",
    ),
    (
        "João Souza",
        "joao.souza@company.com",
        Role::Collaborator,
        AccountStatus::Active,
        "Today, 09:22",
    ),
    (
        "Patricia Costa",
        "patricia.costa@company.com",
        Role::Intern,
        AccountStatus::Active,
        "Today, 11:08",
    ),
    (
        "Roberto Lima",
        "roberto.lima@company.com",
        Role::Manager,
        AccountStatus::Inactive,
        "3 days ago",
    ),
];

type EventSeed = (
    &'static str,
    &'static str,
    EventKind,
    (i32, u32, u32),
    (u32, u32, u32),
    &'static str,
);

const EVENT_SEED: &[EventSeed] = &[
    (
        "Ana Silva",
        "Opened the dashboard",
        EventKind::Access,
        (2025, 11, 7),
        (14, 32, 15),
        "192.168.1.10",
    ),
    (
        "Carlos Santos",
        "Exported the financial report",
        EventKind::Export,
        (2025, 11, 7),
        (12, 15, 42),
        "192.168.1.25",
    ),
    (
        "Maria Oliveira",
        "Changed settings",
        EventKind::Modify,
        (2025, 11, 6),
        (18, 45, 1),
        "192.168.1.33",
    ),
    (
        "João Souza",
        "Viewed sales data",
        EventKind::Access,
        (2025, 11, 7),
        (9, 22, 18),
        "192.168.1.42",
    ),
    (
        "Patricia Costa",
        "Opened the dashboard",
        EventKind::Access,
        (2025, 11, 7),
        (11, 8, 55),
        "192.168.1.51",
    ),
];
