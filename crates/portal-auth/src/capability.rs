//! Role registry: static capability grants per role.
//!
//! # Registry
//!
//! | Role | Admin panel | Legal center | Financials | Full metrics | Departments |
//! |------|:-----------:|:------------:|:----------:|:------------:|-------------|
//! | Admin | ✓ | ✓ | ✓ | ✓ | all |
//! | Legal | | ✓ | | ✓ | none |
//! | Manager | | | ✓ | ✓ | all |
//! | Collaborator | | | | ✓ | subscribed |
//! | Intern | | | | | subscribed |
//!
//! The table is fixed. There is no runtime mutation and no inheritance
//! between roles.
//!
//! # Example
//!
//! ```
//! use portal_auth::{capabilities, Capability, DepartmentScope, Role};
//!
//! let caps = capabilities(Role::Manager);
//! assert!(caps.can_view_financials());
//! assert!(!caps.can_view_admin_panel());
//! assert_eq!(caps.departments(), DepartmentScope::All);
//!
//! // Capability sets compose like bitflags
//! let admin = capabilities(Role::Admin).grants();
//! assert!(admin.contains(Capability::LEGAL_CENTER | Capability::FINANCIALS));
//! ```

use bitflags::bitflags;
use portal_types::Role;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Static grants a role carries.
    ///
    /// | Capability | Gates |
    /// |------------|-------|
    /// | [`ADMIN_PANEL`](Self::ADMIN_PANEL) | `admin` view |
    /// | [`LEGAL_CENTER`](Self::LEGAL_CENTER) | eligibility for the `legal` view (step-up still required) |
    /// | [`FINANCIALS`](Self::FINANCIALS) | finance department data |
    /// | [`FULL_METRICS`](Self::FULL_METRICS) | detail breakdowns instead of headline numbers only |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capability: u8 {
        /// Enter the administration panel.
        const ADMIN_PANEL  = 0b0000_0001;
        /// Eligible to step up into the legal center.
        const LEGAL_CENTER = 0b0000_0010;
        /// See financial data.
        const FINANCIALS   = 0b0000_0100;
        /// See detail breakdowns.
        const FULL_METRICS = 0b0000_1000;
    }
}

/// Which departments a role's dashboards cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentScope {
    /// Every department, regardless of subscriptions.
    All,
    /// Only departments in the session's subscription set.
    Subscribed,
    /// No department access granted by the role.
    None,
}

/// The registry row for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapabilities {
    grants: Capability,
    departments: DepartmentScope,
}

impl RoleCapabilities {
    const fn new(grants: Capability, departments: DepartmentScope) -> Self {
        Self {
            grants,
            departments,
        }
    }

    /// Static grants.
    #[must_use]
    pub const fn grants(&self) -> Capability {
        self.grants
    }

    /// Department visibility mode.
    #[must_use]
    pub const fn departments(&self) -> DepartmentScope {
        self.departments
    }

    /// `canViewAdminPanel`.
    #[must_use]
    pub const fn can_view_admin_panel(&self) -> bool {
        self.grants.contains(Capability::ADMIN_PANEL)
    }

    /// Eligible for the legal center. Entry still requires step-up.
    #[must_use]
    pub const fn can_view_legal_center(&self) -> bool {
        self.grants.contains(Capability::LEGAL_CENTER)
    }

    /// `canViewFinancials`.
    #[must_use]
    pub const fn can_view_financials(&self) -> bool {
        self.grants.contains(Capability::FINANCIALS)
    }

    /// `canSeeFullMetrics`.
    #[must_use]
    pub const fn can_see_full_metrics(&self) -> bool {
        self.grants.contains(Capability::FULL_METRICS)
    }
}

const ADMIN: RoleCapabilities = RoleCapabilities::new(
    Capability::ADMIN_PANEL
        .union(Capability::LEGAL_CENTER)
        .union(Capability::FINANCIALS)
        .union(Capability::FULL_METRICS),
    DepartmentScope::All,
);

const LEGAL: RoleCapabilities = RoleCapabilities::new(
    Capability::LEGAL_CENTER.union(Capability::FULL_METRICS),
    DepartmentScope::None,
);

const MANAGER: RoleCapabilities = RoleCapabilities::new(
    Capability::FINANCIALS.union(Capability::FULL_METRICS),
    DepartmentScope::All,
);

const COLLABORATOR: RoleCapabilities =
    RoleCapabilities::new(Capability::FULL_METRICS, DepartmentScope::Subscribed);

const INTERN: RoleCapabilities =
    RoleCapabilities::new(Capability::empty(), DepartmentScope::Subscribed);

/// Looks up the registry row for a role.
#[must_use]
pub const fn capabilities(role: Role) -> RoleCapabilities {
    match role {
        Role::Admin => ADMIN,
        Role::Legal => LEGAL,
        Role::Manager => MANAGER,
        Role::Collaborator => COLLABORATOR,
        Role::Intern => INTERN,
    }
}
