//! Visibility policy: pure functions over (role, subscriptions, department).
//!
//! Presentation components ask these functions, per widget and per
//! department, what to render. Nothing here reads a session; callers pass
//! the role and subscription set explicitly.
//!
//! # Rules
//!
//! | Function | Result |
//! |----------|--------|
//! | [`is_department_visible`] | scope `All` → true; `Subscribed` → membership; `None` → false |
//! | [`is_financial_data_visible`] | department visible(finance) ∧ `FINANCIALS` |
//! | [`is_metric_detail_visible`] | `FULL_METRICS` |
//!
//! An empty subscription set hides every department of a `Subscribed`
//! role. That is the valid "no departments selected" state, not an error.

use crate::capability::{capabilities, DepartmentScope};
use portal_types::{DepartmentId, DepartmentSet, Role};
use serde::{Deserialize, Serialize};

/// Returns `true` if the role's dashboards cover the department.
///
/// # Example
///
/// ```
/// use portal_auth::{is_department_visible, DepartmentId, DepartmentSet, Role};
///
/// let none = DepartmentSet::empty();
/// assert!(is_department_visible(Role::Manager, none, DepartmentId::It));
/// assert!(!is_department_visible(Role::Intern, none, DepartmentId::It));
/// assert!(is_department_visible(Role::Intern, DepartmentSet::IT, DepartmentId::It));
/// ```
#[must_use]
pub fn is_department_visible(
    role: Role,
    subscriptions: DepartmentSet,
    department: DepartmentId,
) -> bool {
    match capabilities(role).departments() {
        DepartmentScope::All => true,
        DepartmentScope::Subscribed => subscriptions.contains_department(department),
        DepartmentScope::None => false,
    }
}

/// Returns `true` if financial data renders.
///
/// Always the conjunction of finance department visibility and the
/// financial capability: a Manager sees finance without subscribing, a
/// Collaborator subscribed to finance still does not.
///
/// # Example
///
/// ```
/// use portal_auth::{is_financial_data_visible, DepartmentSet, Role};
///
/// assert!(is_financial_data_visible(Role::Manager, DepartmentSet::empty()));
/// assert!(!is_financial_data_visible(Role::Collaborator, DepartmentSet::FINANCE));
/// ```
#[must_use]
pub fn is_financial_data_visible(role: Role, subscriptions: DepartmentSet) -> bool {
    is_department_visible(role, subscriptions, DepartmentId::Finance)
        && capabilities(role).can_view_financials()
}

/// Returns `true` if detail breakdowns render (vs. headline numbers only).
#[must_use]
pub fn is_metric_detail_visible(role: Role) -> bool {
    capabilities(role).can_see_full_metrics()
}

/// How a department panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentAccess {
    /// Panel renders with data.
    Visible,
    /// Department is in scope but its data is capability-gated
    /// (finance without `FINANCIALS`). Panel content is withheld.
    Restricted,
    /// Department is out of scope. Panel does not render.
    Hidden,
}

impl DepartmentAccess {
    /// Returns `true` for [`DepartmentAccess::Visible`].
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Classifies a department panel for rendering.
///
/// Finance is the only department whose data carries a capability gate on
/// top of department scope.
#[must_use]
pub fn department_access(
    role: Role,
    subscriptions: DepartmentSet,
    department: DepartmentId,
) -> DepartmentAccess {
    if !is_department_visible(role, subscriptions, department) {
        return DepartmentAccess::Hidden;
    }
    if department == DepartmentId::Finance && !is_financial_data_visible(role, subscriptions) {
        return DepartmentAccess::Restricted;
    }
    DepartmentAccess::Visible
}
